//! Configuration loading for the week grid.
//!
//! The host points the grid at a TOML file; a missing file silently yields
//! the defaults, while a malformed one is a real error with context.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::settings::GridConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid configuration: {0}")]
    Invalid(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a TOML document into a [`GridConfig`].
///
/// Unknown keys are ignored; missing keys fall back to their defaults.
pub fn from_toml_str(raw: &str) -> Result<GridConfig> {
    let config: GridConfig = toml::from_str(raw).map_err(ConfigError::Parse)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Load configuration from a file, defaulting when the file is absent.
pub fn load_from_path(path: &Path) -> Result<GridConfig> {
    if !path.exists() {
        log::debug!("no grid config at {:?}, using defaults", path);
        return Ok(GridConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    from_toml_str(&raw).with_context(|| format!("Failed to load config from {:?}", path))
}
