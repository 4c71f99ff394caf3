//! Rule tags and tag-based selection
//!
//! Every rule carries a small set of tags. The [`VALIDATION`](Tag::VALIDATION)
//! tag marks a rule as a pure, non-mutating check; domain tags (`kerberos`,
//! `nfs`, ...) let an operator run a subset of the catalogue. Selection is an
//! explicit filter over a rule set, never a correctness mechanism: it decides
//! which rules run, not how they run.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A label attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Carried by every rule: the rule only inspects configuration.
    pub const VALIDATION: Tag = Tag(Cow::Borrowed("validation"));

    /// Creates a tag from a static label.
    #[must_use]
    pub const fn from_static(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    /// Creates a tag from any label.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(label: &'static str) -> Self {
        Self::from_static(label)
    }
}

impl From<String> for Tag {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Include/exclude filter over rule tags.
///
/// A rule is selected when it carries at least one included tag (or the
/// include list is empty) and carries none of the excluded tags. Exclusion
/// wins over inclusion.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::foundation::{Selection, Tag};
///
/// let only_nfs = Selection::all().include("nfs");
/// assert!(only_nfs.matches(&[Tag::VALIDATION, Tag::from("nfs")]));
/// assert!(!only_nfs.matches(&[Tag::VALIDATION, Tag::from("samba")]));
///
/// let no_samba = Selection::all().exclude("samba");
/// assert!(!no_samba.matches(&[Tag::VALIDATION, Tag::from("samba")]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    include: Vec<Tag>,
    exclude: Vec<Tag>,
}

impl Selection {
    /// Selects every rule.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a tag to the include list.
    #[must_use = "builder methods must be chained or built"]
    pub fn include(mut self, tag: impl Into<Tag>) -> Self {
        self.include.push(tag.into());
        self
    }

    /// Adds a tag to the exclude list.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclude(mut self, tag: impl Into<Tag>) -> Self {
        self.exclude.push(tag.into());
        self
    }

    /// Returns true if a rule with `tags` should run.
    #[must_use]
    pub fn matches(&self, tags: &[Tag]) -> bool {
        if tags.iter().any(|tag| self.exclude.contains(tag)) {
            return false;
        }
        self.include.is_empty() || tags.iter().any(|tag| self.include.contains(tag))
    }
}
