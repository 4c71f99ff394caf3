//! Prelude module for convenient imports.
//!
//! ```rust
//! use preflight_validator::prelude::*;
//!
//! let path = not_blank().and(absolute_path());
//! assert!(path.validate("/srv/share").is_ok());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, tags
// ============================================================================

pub use crate::foundation::{
    ErrorKind, Selection, Tag, Validate, ValidateExt, ValidationError, ValidationResult,
};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{And, Each, and, collect_each, each};

// ============================================================================
// ENGINE: Rules, rule sets, evaluation, reports
// ============================================================================

pub use crate::engine::Validator;
pub use crate::report::{Diagnostic, DomainReport, Outcome, Report, RuleOutcome, Tally};
pub use crate::rule::{Rule, RuleKind};
pub use crate::rule_set::RuleSet;
