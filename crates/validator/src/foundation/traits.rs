//! Core traits for the validation system

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every value-level validator implements.
///
/// Validators are generic over their input type, so a string validator cannot
/// be handed a sequence by accident.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::foundation::{ErrorKind, Validate, ValidationError};
///
/// struct Lowercase;
///
/// impl Validate for Lowercase {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.chars().all(|c| !c.is_uppercase()) {
///             Ok(())
///         } else {
///             Err(ValidationError::invalid_format(input, "lowercase text"))
///         }
///     }
/// }
///
/// assert!(Lowercase.validate("nfs").is_ok());
/// assert!(Lowercase.validate("NFS").is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str` and `[T]`.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing combinator methods for validators.
///
/// Automatically implemented for every [`Validate`] type.
pub trait ValidateExt: Validate + Sized {
    /// Combines two validators with logical AND, short-circuiting on the
    /// first failure.
    ///
    /// ```rust
    /// use preflight_validator::prelude::*;
    ///
    /// let keytab = not_blank().and(absolute_path());
    /// assert!(keytab.validate("/etc/krb5.keytab").is_ok());
    /// assert_eq!(keytab.validate("").unwrap_err().kind, ErrorKind::MissingField);
    /// assert_eq!(keytab.validate("etc/krb5.keytab").unwrap_err().kind, ErrorKind::FormatViolation);
    /// ```
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// Applies this validator to every element of a slice.
    fn each<T>(self) -> Each<Self, T>
    where
        T: std::borrow::Borrow<Self::Input>,
    {
        Each::new(self)
    }
}

impl<T: Validate> ValidateExt for T {}

pub use crate::combinators::and::And;
pub use crate::combinators::each::Each;

// ============================================================================
// TESTS
// ============================================================================
