//! # preflight-log
//!
//! Structured logging for preflight, built on `tracing`.
//!
//! Diagnostics go to stderr; stdout belongs to the validation report.
//!
//! ```rust,no_run
//! use preflight_log::{Config, LoggerBuilder};
//!
//! let _guard = LoggerBuilder::from_config(Config::from_env()).build()?;
//! preflight_log::info!(sources = 2, "loading configuration");
//! # Ok::<(), preflight_log::LogError>(())
//! ```

mod builder;
mod config;
mod error;
mod macros;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

// Re-export tracing macros so callers need a single logging dependency.
pub use tracing::{Level, debug, debug_span, error, info, info_span, trace, warn};
