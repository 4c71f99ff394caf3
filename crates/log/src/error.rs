//! Logging errors

use thiserror::Error;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LogError {
    /// The level directive could not be parsed.
    #[error("invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    /// A global subscriber was already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Result type for logging setup.
pub type LogResult<T> = Result<T, LogError>;
