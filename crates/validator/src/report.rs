//! Validation reports
//!
//! A [`Report`] is the only product of a validation pass. It holds one
//! [`DomainReport`] per evaluated domain, in evaluation order, and each
//! domain holds one [`RuleOutcome`] per selected rule, in declaration order.
//! Both orders are deterministic, so the rendered text is stable
//! byte-for-byte across runs.

use crate::foundation::ValidationError;
use crate::rule::RuleKind;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// OUTCOMES
// ============================================================================

/// A failed rule with its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub domain: Cow<'static, str>,
    pub rule: Cow<'static, str>,
    pub fail_msg: Cow<'static, str>,
    pub error: ValidationError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.domain, self.rule, self.error)
    }
}

/// What happened to one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed(Diagnostic),
    /// Not evaluated because a prerequisite of the domain failed first.
    Skipped { blocked_by: Cow<'static, str> },
}

/// A rule name, its kind and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: Cow<'static, str>,
    pub kind: RuleKind,
    pub outcome: Outcome,
}

impl RuleOutcome {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped { .. })
    }

    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.outcome {
            Outcome::Failed(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

// ============================================================================
// TALLY
// ============================================================================

/// Outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    fn count<'a>(outcomes: impl IntoIterator<Item = &'a RuleOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut tally, outcome| {
                match outcome.outcome {
                    Outcome::Passed => tally.passed += 1,
                    Outcome::Failed(_) => tally.failed += 1,
                    Outcome::Skipped { .. } => tally.skipped += 1,
                }
                tally
            })
    }

    /// Total number of rules accounted for.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        )
    }
}

// ============================================================================
// DOMAIN REPORT
// ============================================================================

/// Outcomes of one rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    pub domain: Cow<'static, str>,
    pub outcomes: Vec<RuleOutcome>,
}

impl DomainReport {
    pub fn new(domain: impl Into<Cow<'static, str>>, outcomes: Vec<RuleOutcome>) -> Self {
        Self {
            domain: domain.into(),
            outcomes,
        }
    }

    /// True if no rule of this domain failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.outcomes.iter().any(RuleOutcome::is_failed)
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally::count(&self.outcomes)
    }

    /// Failure diagnostics in declaration order.
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().filter_map(RuleOutcome::diagnostic)
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Aggregated outcome of a validation pass across domains.
///
/// # Examples
///
/// ```rust
/// use preflight_validator::prelude::*;
///
/// let set = RuleSet::new("keytab", "kerberos").rule(Rule::check(
///     "Validate keytab path is absolute",
///     "keytab path must be absolute",
///     |path: &String| absolute_path().validate(path).map_err(|e| e.under("krb5_keytab_path")),
/// ));
///
/// let report = Validator::new().run(&set, &"etc/krb5.keytab".to_owned());
/// assert!(!report.passed());
/// assert_eq!(report.exit_code(), 1);
/// assert_eq!(report.failures().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    passed: bool,
    summary: Tally,
    domains: Vec<DomainReport>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self {
            passed: true,
            summary: Tally::default(),
            domains: Vec::new(),
        }
    }

    /// Appends a domain, keeping evaluation order.
    pub fn push(&mut self, domain: DomainReport) {
        self.passed &= domain.passed();
        let tally = domain.tally();
        self.summary.passed += tally.passed;
        self.summary.failed += tally.failed;
        self.summary.skipped += tally.skipped;
        self.domains.push(domain);
    }

    /// Appends every domain of `other`.
    pub fn merge(&mut self, other: Self) {
        for domain in other.domains {
            self.push(domain);
        }
    }

    /// Logical AND across every evaluated rule.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn domains(&self) -> &[DomainReport] {
        &self.domains
    }

    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&DomainReport> {
        self.domains.iter().find(|d| d.domain == name)
    }

    #[must_use]
    pub const fn tally(&self) -> Tally {
        self.summary
    }

    /// Every failure diagnostic, domain by domain, in rule order.
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.domains.iter().flat_map(DomainReport::failures)
    }

    /// `0` when every rule passed, `1` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.passed { 0 } else { 1 }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<DomainReport> for Report {
    fn from_iter<I: IntoIterator<Item = DomainReport>>(iter: I) -> Self {
        let mut report = Self::new();
        for domain in iter {
            report.push(domain);
        }
        report
    }
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

const DETAIL_INDENT: &str = "      ";

impl fmt::Display for DomainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.domain)?;
        for outcome in &self.outcomes {
            match &outcome.outcome {
                Outcome::Passed => writeln!(f, "  ✓ PASS {}", outcome.rule)?,
                Outcome::Failed(diagnostic) => {
                    writeln!(f, "  ✗ FAIL {}", outcome.rule)?;
                    for leaf in diagnostic.error.leaves() {
                        writeln!(f, "{DETAIL_INDENT}→ {leaf}")?;
                    }
                    writeln!(f, "{DETAIL_INDENT}→ {}", diagnostic.fail_msg)?;
                }
                Outcome::Skipped { blocked_by } => {
                    writeln!(f, "  - SKIP {} (blocked by: {blocked_by})", outcome.rule)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for domain in &self.domains {
            writeln!(f, "{domain}")?;
        }
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "RESULT: {verdict} ({})", self.summary)
    }
}
