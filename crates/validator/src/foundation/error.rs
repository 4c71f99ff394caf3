//! Error types for rule failures
//!
//! A [`ValidationError`] is a *value*, never a fault: rules return it, the
//! engine stores it in the [`Report`](crate::report::Report), and the operator
//! reads it. Every error names the offending field, what was observed and what
//! the contract expected.
//!
//! All string fields use `Cow<'static, str>` so static codes and messages do
//! not allocate.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Taxonomy of contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required key is absent or empty.
    MissingField,
    /// A present value fails a pattern or format constraint.
    FormatViolation,
    /// A field expected to be a non-empty sequence (or mapping) is absent,
    /// empty, or of the wrong shape.
    StructuralViolation,
    /// A value is outside its closed set of legal options.
    EnumViolation,
}

impl ErrorKind {
    /// Stable snake_case name, used as the default error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::FormatViolation => "format_violation",
            Self::StructuralViolation => "structural_violation",
            Self::EnumViolation => "enum_violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured contract violation.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::invalid_format("example.com", "^[A-Z0-9.-]+$").under("krb5_realm");
/// assert_eq!(error.kind, ErrorKind::FormatViolation);
/// assert_eq!(error.field.as_deref(), Some("krb5_realm"));
/// assert_eq!(error.param("observed"), Some("\"example.com\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Which class of contract was violated.
    pub kind: ErrorKind,

    /// Error code for programmatic handling.
    ///
    /// Examples: "missing_field", "not_absolute", "realm_format"
    pub code: Cow<'static, str>,

    /// Human-readable description of the violation, without the field name.
    pub message: Cow<'static, str>,

    /// Field path of the offending value.
    ///
    /// Examples: "krb5_realm", "shares[0].path", "nfs_exports[1].clients[0].host"
    pub field: Option<Cow<'static, str>>,

    /// Ordered key/value parameters, typically `observed` and `expected`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Per-element errors of a sequence rule, in element order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ValidationError>,

    /// Optional hint for fixing the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<Cow<'static, str>>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
            help: None,
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds a single nested error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    /// Adds help text or a suggestion.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Prefixes the field path of this error and all nested errors.
    ///
    /// Index segments (`[2]`) attach without a dot, names attach with one:
    /// `"path"` under `"shares[0]"` becomes `"shares[0].path"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn under(mut self, prefix: &str) -> Self {
        self.field = Some(Cow::Owned(match self.field.take() {
            None => prefix.to_owned(),
            Some(field) if field.starts_with('[') => format!("{prefix}{field}"),
            Some(field) => format!("{prefix}.{field}"),
        }));
        self.nested = self
            .nested
            .into_iter()
            .map(|nested| nested.under(prefix))
            .collect();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns the leaf errors in depth-first order.
    ///
    /// An error without nested errors is its own leaf.
    #[must_use]
    pub fn leaves(&self) -> Vec<&ValidationError> {
        if self.nested.is_empty() {
            return vec![self];
        }
        self.nested.iter().flat_map(ValidationError::leaves).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message)?,
            None => write!(f, "{}", self.message)?,
        }

        if let Some(help) = &self.help {
            write!(f, " ({help})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// A required key is not present at all.
    pub fn missing() -> Self {
        Self::new(ErrorKind::MissingField, "missing_field", "is not defined")
            .with_param("observed", "<undefined>")
    }

    /// A required key is present but null or blank.
    pub fn empty() -> Self {
        Self::new(ErrorKind::MissingField, "empty_field", "is defined but empty")
            .with_param("observed", "\"\"")
    }

    /// A present value fails a format constraint.
    pub fn invalid_format(observed: &str, expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new(
            ErrorKind::FormatViolation,
            "invalid_format",
            format!("value {observed:?} does not match {expected}"),
        )
        .with_param("observed", format!("{observed:?}"))
        .with_param("expected", expected)
    }

    /// A value has the wrong shape (e.g. a string where a sequence belongs).
    pub fn wrong_shape(
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let found = found.into();
        Self::new(
            ErrorKind::StructuralViolation,
            "wrong_shape",
            format!("expected {expected}, found {found}"),
        )
        .with_param("observed", found)
        .with_param("expected", expected)
    }

    /// A value is not one of the allowed options.
    pub fn not_one_of(observed: &str, allowed: &[&str]) -> Self {
        let allowed = allowed.join(", ");
        Self::new(
            ErrorKind::EnumViolation,
            "not_one_of",
            format!("value {observed:?} is not one of [{allowed}]"),
        )
        .with_param("observed", format!("{observed:?}"))
        .with_param("expected", allowed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
