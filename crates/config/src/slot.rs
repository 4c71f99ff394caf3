//! Field slots: the decoded state of one configuration key
//!
//! Variables documents are loosely typed. A field can be missing, present
//! but null, present with a usable value, or present with the wrong shape.
//! [`Slot`] keeps all four apart so rules can report each one precisely,
//! and decoding never fails because of a single field.

use preflight_validator::foundation::ValidationError;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

// ============================================================================
// SLOT
// ============================================================================

/// The decoded state of a configuration field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot<T> {
    /// The key is not present.
    #[default]
    Absent,
    /// The key is present with a null (or empty YAML) value.
    Null,
    /// The key holds a value of the expected shape.
    Present(T),
    /// The key holds a value of another shape.
    Invalid {
        /// Shape of the value found, e.g. "a mapping".
        found: &'static str,
        /// Compact JSON rendering of the value found.
        raw: String,
    },
}

impl<T> Slot<T> {
    #[must_use]
    pub const fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value, or the error describing why there is none.
    ///
    /// `expected` names the wanted shape ("a sequence", "a mapping") and is
    /// only used for [`Slot::Invalid`]. The error carries no field path.
    pub fn require(&self, expected: &'static str) -> Result<&T, ValidationError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(ValidationError::missing()),
            Self::Null => Err(ValidationError::empty()),
            Self::Invalid { found, raw } => {
                Err(ValidationError::wrong_shape(expected, *found).with_param("raw", raw.clone()))
            }
        }
    }

    /// Returns the value if present, `None` if absent or null, and an error
    /// for a value of the wrong shape.
    pub fn optional(&self, expected: &'static str) -> Result<Option<&T>, ValidationError> {
        match self {
            Self::Absent | Self::Null => Ok(None),
            other => other.require(expected).map(Some),
        }
    }
}

impl<T: DeserializeOwned> Slot<T> {
    /// Decodes a raw value into a slot. Never fails.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            return Self::Null;
        }
        match serde_json::from_value::<T>(value.clone()) {
            Ok(decoded) => Self::Present(decoded),
            Err(_) => Self::Invalid {
                found: shape_of(&value),
                raw: value.to_string(),
            },
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Human-readable shape of a raw value.
#[must_use]
pub const fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

// ============================================================================
// SCALAR
// ============================================================================

/// A scalar value rendered as text.
///
/// Accepts strings, numbers and booleans, so `mode: 0755` and
/// `mode: "0755"` both decode. Sequences and mappings are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Scalar {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

// ============================================================================
// TESTS
// ============================================================================
