//! Hostname validator (RFC 1123).
//!
//! - Total length: 1..=253 characters (excluding optional trailing dot)
//! - Split by `.` into labels
//! - Each label: 1..=63 characters, `[a-zA-Z0-9-]` only
//! - Labels must not start or end with a hyphen
//! - Trailing dot optional (FQDN)
//!
//! Used for the host component of service principals.

use crate::foundation::{Validate, ValidationError};

const EXPECTED: &str = "an RFC 1123 hostname";

// ============================================================================
// HOSTNAME VALIDATOR
// ============================================================================

/// Validates hostnames per RFC 1123.
///
/// # Examples
///
/// ```
/// use preflight_validator::validators::hostname;
/// use preflight_validator::foundation::Validate;
///
/// let v = hostname();
/// assert!(v.validate("kdc.example.com").is_ok());
/// assert!(v.validate("kdc.example.com.").is_ok());
/// assert!(v.validate("").is_err());
/// assert!(v.validate("-kdc.example.com").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hostname;

impl Hostname {
    fn reject(input: &str, reason: String) -> ValidationError {
        ValidationError::invalid_format(input, EXPECTED).with_param("reason", reason)
    }
}

impl Validate for Hostname {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::empty());
        }

        let hostname = input.strip_suffix('.').unwrap_or(input);

        if hostname.is_empty() {
            return Err(Self::reject(input, "no labels".to_owned()));
        }

        if hostname.len() > 253 {
            return Err(Self::reject(
                input,
                format!("length {} exceeds 253 characters", hostname.len()),
            ));
        }

        for label in hostname.split('.') {
            if label.is_empty() {
                return Err(Self::reject(input, "empty label".to_owned()));
            }

            if label.len() > 63 {
                return Err(Self::reject(
                    input,
                    format!("label '{label}' exceeds 63 characters"),
                ));
            }

            if label.starts_with('-') || label.ends_with('-') {
                return Err(Self::reject(
                    input,
                    format!("label '{label}' starts or ends with a hyphen"),
                ));
            }

            if let Some(ch) = label
                .chars()
                .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
            {
                return Err(Self::reject(
                    input,
                    format!("label '{label}' contains invalid character '{ch}'"),
                ));
            }
        }

        Ok(())
    }
}

/// Creates a new [`Hostname`] validator.
#[must_use]
pub const fn hostname() -> Hostname {
    Hostname
}

// ============================================================================
// TESTS
// ============================================================================
