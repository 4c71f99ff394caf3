//! Ordered rule collections scoped to one configuration domain

use crate::foundation::{Selection, Tag};
use crate::rule::Rule;
use std::borrow::Cow;
use std::fmt;

/// An ordered list of [`Rule`]s over one domain (realm, shares, ...).
///
/// Declaration order is evaluation order: structural prerequisites come
/// first so later rules can assume them.
pub struct RuleSet<C> {
    domain: Cow<'static, str>,
    tag: Tag,
    rules: Vec<Rule<C>>,
}

impl<C> RuleSet<C> {
    /// Creates an empty rule set. `tag` is added to every rule pushed into it.
    pub fn new(domain: impl Into<Cow<'static, str>>, tag: impl Into<Tag>) -> Self {
        Self {
            domain: domain.into(),
            tag: tag.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule, tagging it with the set's domain tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: Rule<C>) -> Self {
        self.push(rule);
        self
    }

    /// Appends a rule in place.
    pub fn push(&mut self, rule: Rule<C>) {
        self.rules.push(rule.with_tag(self.tag.clone()));
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The tag every rule in this set carries.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules matched by `selection`, in declaration order.
    pub fn selected<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a Rule<C>> {
        self.rules
            .iter()
            .filter(move |rule| selection.matches(rule.tags()))
    }

    pub(crate) fn domain_cow(&self) -> Cow<'static, str> {
        self.domain.clone()
    }
}

impl<C> fmt::Debug for RuleSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("domain", &self.domain)
            .field("tag", &self.tag)
            .field("rules", &self.rules)
            .finish()
    }
}
