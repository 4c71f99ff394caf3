//! Configuration errors

use crate::source::ConfigFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before any rule runs: the document could not be read,
/// parsed or decoded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported configuration format for {}: {extension}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to parse {origin} as {format}: {message}")]
    Parse {
        origin: String,
        format: ConfigFormat,
        message: String,
    },

    /// The document parsed but does not have the shape of a variables
    /// document (its root is not a mapping).
    #[error("cannot decode {origin}: {message}")]
    Decode { origin: String, message: String },

    #[error("no configuration sources given")]
    NoSources,
}

impl ConfigError {
    pub(crate) fn decode(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// Standard result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
