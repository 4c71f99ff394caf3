//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`ValidateExt`]
//! - **Errors**: [`ValidationError`], [`ErrorKind`]
//! - **Tags**: [`Tag`], [`Selection`]
//!
//! Value-level validators implement [`Validate`] and compose with the
//! [`ValidateExt`] combinators. Rules (see [`crate::rule`]) wrap validators
//! with a name, a fail message and tags so the engine can evaluate them in
//! declaration order.

pub mod error;
pub mod tag;
pub mod traits;

pub use error::{ErrorKind, ValidationError};
pub use tag::{Selection, Tag};
pub use traits::{Validate, ValidateExt};

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
