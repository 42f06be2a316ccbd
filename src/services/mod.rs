// Service module exports

pub mod bus;
pub mod interaction;
pub mod layout;
pub mod settings;
