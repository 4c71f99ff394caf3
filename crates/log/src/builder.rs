//! Logger builder implementation

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the root span entered for the lifetime of the process.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span: tracing::span::EnteredSpan,
}

/// Applies the display options to a fmt layer and installs it with the filter.
/// `without_time` changes the layer type, hence the two arms.
macro_rules! init_fmt_layer {
    ($filter:expr, $layer:expr, $display:expr) => {{
        let layer = $layer
            .with_writer(std::io::stderr)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source);
        if $display.time {
            Registry::default().with($filter).with(layer).try_init()
        } else {
            Registry::default()
                .with($filter)
                .with(layer.without_time())
                .try_init()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The level directive cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = parse_filter(&self.config.level)?;
        let display = self.config.display;

        let installed = match self.config.format {
            Format::Pretty => init_fmt_layer!(filter, fmt::layer().pretty(), display),
            Format::Compact => init_fmt_layer!(filter, fmt::layer().compact(), display),
            Format::Json => init_fmt_layer!(filter, fmt::layer().json(), display),
        };
        installed.map_err(|e| LogError::Init(e.to_string()))?;

        let root = tracing::info_span!("preflight", version = env!("CARGO_PKG_VERSION"));
        Ok(LoggerGuard {
            _root_span: root.entered(),
        })
    }
}

fn parse_filter(directive: &str) -> LogResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| LogError::Filter {
        directive: directive.to_owned(),
        reason: e.to_string(),
    })
}
