//! Loading, merging and decoding of variables documents

use crate::error::{ConfigError, ConfigResult};
use crate::model::DeploymentConfig;
use crate::slot::shape_of;
use crate::source::{ConfigFormat, ConfigSource};
use serde_json::{Map, Value};
use std::path::Path;

/// How a later source combines with earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Top-level keys of the later source replace earlier values whole.
    #[default]
    Replace,
    /// Mappings merge recursively; anything else is replaced.
    Deep,
}

impl std::str::FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(Self::Replace),
            "merge" | "deep" => Ok(Self::Deep),
            other => Err(format!("unknown merge strategy: {other}")),
        }
    }
}

/// Builds a [`DeploymentConfig`] from ordered sources.
///
/// ```rust
/// use preflight_config::{ConfigBuilder, ConfigSource};
///
/// let config = ConfigBuilder::new()
///     .with_source(ConfigSource::inline("defaults", "krb5_realm: EXAMPLE.COM\nkrb5_kdc: kdc1"))
///     .with_source(ConfigSource::inline("site", "krb5_kdc: kdc2.example.com"))
///     .build()?;
///
/// assert_eq!(config.kerberos.kdc.present().map(|k| k.as_str()), Some("kdc2.example.com"));
/// # Ok::<(), preflight_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
    strategy: MergeStrategy,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source. Later sources take precedence.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_source(mut self, source: impl Into<ConfigSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Adds several sources in order.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConfigSource>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Loads and merges every source into one mapping.
    ///
    /// # Errors
    ///
    /// The first source that cannot be read, parsed or is not a mapping.
    pub fn load(&self) -> ConfigResult<Map<String, Value>> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        preflight_log::info!(sources = self.sources.len(), "loading configuration");

        let mut merged = Map::new();
        for source in &self.sources {
            let document = load_source(source)?;
            preflight_log::debug!(%source, keys = document.len(), "loaded source");
            match self.strategy {
                MergeStrategy::Replace => merged.extend(document),
                MergeStrategy::Deep => merge_deep(&mut merged, document),
            }
        }
        Ok(merged)
    }

    /// Loads, merges and decodes the sources.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load) and [`decode`].
    pub fn build(&self) -> ConfigResult<DeploymentConfig> {
        decode("merged configuration", Value::Object(self.load()?))
    }
}

/// Reads one source into a mapping.
///
/// # Errors
///
/// Missing or unreadable file, unknown extension, syntax error, or a root
/// that is not a mapping. An empty document is an empty mapping.
pub fn load_source(source: &ConfigSource) -> ConfigResult<Map<String, Value>> {
    let origin = source.to_string();
    let (format, content) = match source {
        ConfigSource::File(path) => (file_format(path)?, read_file(path)?),
        ConfigSource::Inline { format, content, .. } => (format.clone(), content.clone()),
    };

    let value = parse(&origin, &format, &content)?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ConfigError::decode(
            origin,
            format!("expected a mapping at the document root, found {}", shape_of(&other)),
        )),
    }
}

fn file_format(path: &Path) -> ConfigResult<ConfigFormat> {
    match ConfigFormat::from_path(path) {
        ConfigFormat::Unknown(extension) => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
        format => Ok(format),
    }
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn parse(origin: &str, format: &ConfigFormat, content: &str) -> ConfigResult<Value> {
    let parse_error = |message: String| ConfigError::Parse {
        origin: origin.to_owned(),
        format: format.clone(),
        message,
    };

    match format {
        ConfigFormat::Yaml if is_blank_yaml(content) => Ok(Value::Null),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        ConfigFormat::Unknown(ext) => Err(parse_error(format!("unsupported format {ext:?}"))),
    }
}

/// Only whitespace, comments and document markers.
fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Recursive mapping merge; non-mapping values are replaced.
fn merge_deep(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match value {
            Value::Object(incoming) => {
                if let Some(Value::Object(existing)) = target.get_mut(&key) {
                    merge_deep(existing, incoming);
                } else {
                    target.insert(key, Value::Object(incoming));
                }
            }
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Decodes a merged document into the typed model.
///
/// # Errors
///
/// [`ConfigError::Decode`] when the root is not a mapping. Field shapes never
/// fail decoding; they surface as [`Slot::Invalid`](crate::Slot::Invalid).
pub fn decode(origin: &str, value: Value) -> ConfigResult<DeploymentConfig> {
    if !value.is_object() {
        return Err(ConfigError::decode(
            origin,
            format!("expected a mapping at the document root, found {}", shape_of(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|e| ConfigError::decode(origin, e.to_string()))
}
