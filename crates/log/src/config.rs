//! Logger configuration

use std::fmt;
use std::str::FromStr;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// What each event line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub colors: bool,
    pub time: bool,
    pub target: bool,
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            time: true,
            target: false,
            source: false,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `warn` or `preflight_rules=debug`
    pub level: String,
    pub format: Format,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: Format::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    ///
    /// Level from `PREFLIGHT_LOG`, then `RUST_LOG`. Format from
    /// `PREFLIGHT_LOG_FORMAT`. `NO_COLOR` disables colors.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("PREFLIGHT_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("PREFLIGHT_LOG_FORMAT") {
            // Unknown values keep the default rather than failing startup.
            config.format = format.parse().unwrap_or_default();
        }

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.display.colors = false;
        }

        config
    }

    /// Raises the level for `-v` flags: 1 → info, 2 → debug, 3+ → trace.
    ///
    /// Zero leaves the configured level alone.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        let level = match verbosity {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.level = level.to_owned();
        self
    }
}
