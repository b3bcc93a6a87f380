//! Configuration loading and types for quire.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading and validating configs from files (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use types::Config;

/// Name of the config file `init` writes and `build` looks for.
pub const CONFIG_FILE_NAME: &str = "quire.yaml";

/// Prefix of environment variables that override config values
/// (e.g., `QUIRE_SITE__TITLE`).
pub const ENV_PREFIX: &str = "QUIRE";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
