//! View-session event bus.
//!
//! Cross-component signals (a filter chip added in one menu, a record
//! expansion requested from the grid) travel over an explicit channel that
//! is injected into each component that needs it. There is no ambient
//! global; a bus lives exactly as long as its view session.

use std::cell::RefCell;

use chrono::{DateTime, Local, NaiveTime};

/// Typed cross-component events for one view session.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A record wants to be opened in the host's expanded editor
    RecordExpandRequested { record_id: String },
    /// An empty slot was picked for creating a new record
    RecordCreateRequested { day_index: usize, time: NaiveTime },
    /// A filter was added from a menu; distant panels should refresh
    FilterAdded { field: String },
    /// A drag or resize committed a new range
    RangeCommitted {
        record_id: String,
        start: DateTime<Local>,
        end: DateTime<Local>,
    },
}

type Subscriber = Box<dyn Fn(&ViewEvent)>;

/// Publish/subscribe channel scoped to the active view session.
///
/// Single-threaded by design, like the rest of the grid: there is exactly
/// one event loop, so interior mutability is enough.
#[derive(Default)]
pub struct ViewBus {
    subscribers: RefCell<Vec<Subscriber>>,
}

impl ViewBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&ViewEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    pub fn publish(&self, event: ViewEvent) {
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(&event);
        }
    }
}
