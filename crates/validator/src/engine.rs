//! Rule set evaluation
//!
//! Policy: fail fast within a domain, aggregate across domains. A failed
//! [`Prerequisite`](RuleKind::Prerequisite) turns every later selected rule
//! of its domain into a skipped outcome; a failed
//! [`Check`](RuleKind::Check) is recorded and evaluation continues. Each
//! rule set is evaluated on its own, so one broken domain never hides the
//! problems of another.

use crate::foundation::{Selection, ValidationError};
use crate::report::{Diagnostic, DomainReport, Outcome, Report, RuleOutcome};
use crate::rule::{Rule, RuleKind};
use crate::rule_set::RuleSet;
use std::borrow::Cow;

/// Evaluates rule sets against a configuration value.
///
/// Holds nothing but the rule selection: running it twice on the same input
/// yields identical reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    selection: Selection,
}

impl Validator {
    /// A validator that runs every rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts evaluation to rules matched by `selection`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Evaluates one rule set, returning its domain's outcomes.
    pub fn evaluate<C>(&self, set: &RuleSet<C>, config: &C) -> DomainReport {
        let span = tracing::debug_span!("domain", domain = set.domain());
        let _enter = span.enter();

        let mut outcomes = Vec::with_capacity(set.len());
        let mut blocked_by: Option<Cow<'static, str>> = None;

        for rule in set.selected(&self.selection) {
            let outcome = match blocked_by.clone() {
                Some(prerequisite) => {
                    tracing::debug!(rule = rule.name(), blocked_by = %prerequisite, "skipped");
                    Outcome::Skipped {
                        blocked_by: prerequisite,
                    }
                }
                None => match rule.evaluate(config) {
                    Ok(()) => {
                        tracing::debug!(rule = rule.name(), "passed");
                        Outcome::Passed
                    }
                    Err(error) => {
                        tracing::info!(rule = rule.name(), error = %error, "failed");
                        if rule.kind() == RuleKind::Prerequisite {
                            blocked_by = Some(rule.name_cow());
                        }
                        Outcome::Failed(diagnostic(set, rule, error))
                    }
                },
            };

            outcomes.push(RuleOutcome {
                rule: rule.name_cow(),
                kind: rule.kind(),
                outcome,
            });
        }

        let report = DomainReport::new(set.domain_cow(), outcomes);
        let tally = report.tally();
        tracing::info!(
            domain = set.domain(),
            passed = tally.passed,
            failed = tally.failed,
            skipped = tally.skipped,
            "domain evaluated"
        );
        report
    }

    /// Evaluates one rule set into a report.
    pub fn run<C>(&self, set: &RuleSet<C>, config: &C) -> Report {
        self.run_all(std::iter::once(set), config)
    }

    /// Evaluates rule sets in the given order.
    ///
    /// A domain with no selected rules is left out of the report.
    pub fn run_all<'a, C, I>(&self, sets: I, config: &C) -> Report
    where
        C: 'a,
        I: IntoIterator<Item = &'a RuleSet<C>>,
    {
        sets.into_iter()
            .map(|set| self.evaluate(set, config))
            .filter(|domain| !domain.outcomes.is_empty())
            .collect()
    }
}

fn diagnostic<C>(
    set: &RuleSet<C>,
    rule: &Rule<C>,
    error: ValidationError,
) -> Diagnostic {
    Diagnostic {
        domain: set.domain_cow(),
        rule: rule.name_cow(),
        fail_msg: rule.fail_msg_cow(),
        error,
    }
}
