//! Collection validators

use crate::foundation::{Validate, ValidationError};
use std::marker::PhantomData;

// ============================================================================
// NON-EMPTY
// ============================================================================

/// Validates that a slice has at least one element.
///
/// An empty sequence where entries are required is a structural problem, not
/// a missing scalar, so the error kind is `StructuralViolation`.
pub struct NonEmpty<T> {
    _element: PhantomData<fn(&T)>,
}

impl<T> NonEmpty<T> {
    /// Creates a new non-empty validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<T> Default for NonEmpty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NonEmpty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NonEmpty<T> {}

impl<T> std::fmt::Debug for NonEmpty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NonEmpty")
    }
}

impl<T> Validate for NonEmpty<T> {
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        if input.is_empty() {
            Err(ValidationError::wrong_shape("a non-empty sequence", "an empty sequence"))
        } else {
            Ok(())
        }
    }
}

/// Creates a [`NonEmpty`] validator.
#[must_use]
pub const fn non_empty<T>() -> NonEmpty<T> {
    NonEmpty::new()
}
