//! EACH combinator - validates each element of a sequence

use crate::foundation::{Validate, ValidationError};
use std::borrow::Borrow;
use std::marker::PhantomData;

// ============================================================================
// EACH COMBINATOR
// ============================================================================

/// Validates each element of a slice independently.
///
/// Every element is checked (no early exit) so an operator sees all bad
/// entries in one pass. Each element error is re-rooted under its index
/// (`[1].path`), and the combined error takes the kind of the first failure.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::prelude::*;
///
/// let paths = absolute_path().each();
/// let entries = ["/srv", "srv", "data"];
/// let error = paths.validate(&entries[..]).unwrap_err();
/// assert_eq!(error.nested.len(), 2);
/// assert_eq!(error.nested[0].field.as_deref(), Some("[1]"));
/// ```
///
/// `T` is the element type; it only has to borrow as the inner validator's
/// input, so `Each<NotBlank, String>` and `Each<NotBlank, &str>` both work.
pub struct Each<V, T> {
    inner: V,
    _element: PhantomData<fn(&T)>,
}

impl<V, T> Each<V, T> {
    /// Creates a new EACH combinator.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            _element: PhantomData,
        }
    }
}

impl<V: Clone, T> Clone for Each<V, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<V: std::fmt::Debug, T> std::fmt::Debug for Each<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Each").field("inner", &self.inner).finish()
    }
}

impl<V, T> Validate for Each<V, T>
where
    V: Validate,
    T: Borrow<V::Input>,
{
    type Input = [T];

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        collect_each(
            input
                .iter()
                .map(|element| self.inner.validate(element.borrow())),
        )
    }
}

/// Folds per-element results into one error with indexed nested errors.
///
/// Used by [`Each`] and by rules that walk sequences with a closure rather
/// than a [`Validate`] impl.
pub fn collect_each<I>(results: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = Result<(), ValidationError>>,
{
    let mut total = 0usize;
    let mut failures: Vec<(usize, ValidationError)> = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        total += 1;
        if let Err(e) = result {
            failures.push((index, e.under(&format!("[{index}]"))));
        }
    }

    let Some((_, first)) = failures.first() else {
        return Ok(());
    };

    let indices: Vec<String> = failures.iter().map(|(i, _)| i.to_string()).collect();

    let mut error = ValidationError::new(
        first.kind,
        "each_failed",
        format!("{} of {} entries failed validation", failures.len(), total),
    )
    .with_param("failed_count", failures.len().to_string())
    .with_param("total_count", total.to_string())
    .with_param("failed_indices", indices.join(","));

    for (_, failure) in failures {
        error = error.with_nested_error(failure);
    }

    Err(error)
}

/// Creates an EACH combinator.
pub fn each<V, T>(validator: V) -> Each<V, T> {
    Each::new(validator)
}

// ============================================================================
// TESTS
// ============================================================================
