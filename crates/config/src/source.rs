//! Configuration source definitions

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a variables document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// Configuration file, format detected from its extension
    File(PathBuf),

    /// Inline configuration text
    Inline {
        /// Label used in diagnostics
        name: String,
        format: ConfigFormat,
        content: String,
    },
}

impl ConfigSource {
    /// Inline YAML with a label.
    pub fn inline(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            format: ConfigFormat::Yaml,
            content: content.into(),
        }
    }

    /// The format the source will be parsed as.
    #[must_use]
    pub fn format(&self) -> ConfigFormat {
        match self {
            Self::File(path) => ConfigFormat::from_path(path),
            Self::Inline { format, .. } => format.clone(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file: {}", path.display()),
            Self::Inline { name, .. } => write!(f, "inline: {name}"),
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Configuration format
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Unknown format
    Unknown(String),
}

impl ConfigFormat {
    /// Get file extension for this format
    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yml",
            Self::Unknown(ext) => ext,
        }
    }

    /// Detect format from file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => Self::Json,
            "yml" | "yaml" => Self::Yaml,
            _ => Self::Unknown(ext.to_owned()),
        }
    }

    /// Detect format from file path
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or_else(|| Self::Unknown(String::new()), Self::from_extension)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::Unknown(s) if s.is_empty() => write!(f, "Unknown (no extension)"),
            Self::Unknown(s) => write!(f, "Unknown ({s})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("group_vars/all.yml", ConfigFormat::Yaml)]
    #[case("vars.YAML", ConfigFormat::Yaml)]
    #[case("vars.json", ConfigFormat::Json)]
    #[case("vars.toml", ConfigFormat::Unknown("toml".into()))]
    #[case("vars", ConfigFormat::Unknown(String::new()))]
    fn format_from_path(#[case] path: &str, #[case] expected: ConfigFormat) {
        assert_eq!(ConfigFormat::from_path(Path::new(path)), expected);
    }

    #[test]
    fn source_display() {
        let file = ConfigSource::from(Path::new("inventory/group_vars/all.yml"));
        assert_eq!(file.to_string(), "file: inventory/group_vars/all.yml");

        let inline = ConfigSource::inline("defaults", "krb5_realm: EXAMPLE.COM");
        assert_eq!(inline.to_string(), "inline: defaults");
        assert_eq!(inline.format(), ConfigFormat::Yaml);
    }
}
