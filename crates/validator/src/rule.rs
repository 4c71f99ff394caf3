//! Named rules over a configuration value
//!
//! A [`Rule`] pairs a predicate with the operator-facing name and failure
//! message shown in the [`Report`](crate::report::Report). Its [`RuleKind`]
//! decides what the engine does after a failure.

use crate::foundation::{Tag, Validate, ValidationError};
use serde::Serialize;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// RULE KIND
// ============================================================================

/// How a failure of a rule affects the rest of its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A structural precondition. On failure the remaining rules of the
    /// domain are skipped.
    Prerequisite,
    /// An independent check. On failure the domain continues.
    Check,
}

impl RuleKind {
    /// Lowercase label used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RULE
// ============================================================================

type Predicate<C> = dyn Fn(&C) -> Result<(), ValidationError> + Send + Sync;

/// A single named predicate over a configuration value of type `C`.
///
/// Every rule carries [`Tag::VALIDATION`]; rule sets add their domain tag.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::prelude::*;
///
/// struct Vars {
///     realm: String,
/// }
///
/// let rule = Rule::check(
///     "Validate realm is uppercase",
///     "realm must be uppercase",
///     |vars: &Vars| {
///         if vars.realm == vars.realm.to_uppercase() {
///             Ok(())
///         } else {
///             Err(ValidationError::invalid_format(&vars.realm, "uppercase text").under("realm"))
///         }
///     },
/// );
///
/// assert!(rule.evaluate(&Vars { realm: "EXAMPLE.COM".into() }).is_ok());
/// assert!(rule.evaluate(&Vars { realm: "example.com".into() }).is_err());
/// ```
pub struct Rule<C> {
    name: Cow<'static, str>,
    fail_msg: Cow<'static, str>,
    kind: RuleKind,
    tags: SmallVec<[Tag; 3]>,
    predicate: Box<Predicate<C>>,
}

impl<C> Rule<C> {
    /// Creates a rule of the given kind.
    pub fn new<F>(
        kind: RuleKind,
        name: impl Into<Cow<'static, str>>,
        fail_msg: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&C) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let mut tags = SmallVec::new();
        tags.push(Tag::VALIDATION);
        Self {
            name: name.into(),
            fail_msg: fail_msg.into(),
            kind,
            tags,
            predicate: Box::new(predicate),
        }
    }

    /// Creates a [`RuleKind::Prerequisite`] rule.
    pub fn prerequisite<F>(
        name: impl Into<Cow<'static, str>>,
        fail_msg: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&C) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::new(RuleKind::Prerequisite, name, fail_msg, predicate)
    }

    /// Creates a [`RuleKind::Check`] rule.
    pub fn check<F>(
        name: impl Into<Cow<'static, str>>,
        fail_msg: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&C) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::new(RuleKind::Check, name, fail_msg, predicate)
    }

    /// Adds a tag. Duplicates are ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Operator-facing rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message shown alongside the diagnostic when the rule fails.
    #[must_use]
    pub fn fail_msg(&self) -> &str {
        &self.fail_msg
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Runs the predicate.
    pub fn evaluate(&self, config: &C) -> Result<(), ValidationError> {
        (self.predicate)(config)
    }

    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    pub(crate) fn fail_msg_cow(&self) -> Cow<'static, str> {
        self.fail_msg.clone()
    }
}

impl<C> Validate for Rule<C> {
    type Input = C;

    fn validate(&self, input: &C) -> Result<(), ValidationError> {
        self.evaluate(input)
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}
