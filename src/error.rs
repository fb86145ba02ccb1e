//! Error types for the pagehold continuity cache.

use thiserror::Error;

/// Identity resolution errors
///
/// These are fatal to the caller: the arguments must be fixed at the call site.
/// The store never retries or swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Arguments are not serializable: {0}")]
    Serialization(String),
}

/// Crate-level errors for configuration, logging and the CLI surface
#[derive(Debug, Error)]
pub enum PageholdError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Replay script error: {0}")]
    ScriptError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PageholdError {
    fn from(err: config::ConfigError) -> Self {
        PageholdError::ConfigError(err.to_string())
    }
}
