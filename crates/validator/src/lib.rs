//! # preflight-validator
//!
//! Rule engine for pre-deployment configuration contracts.
//!
//! A [`Rule`](rule::Rule) is a named predicate with an operator-facing
//! failure message. Rules are grouped per configuration domain into ordered
//! [`RuleSet`](rule_set::RuleSet)s, the [`Validator`](engine::Validator)
//! evaluates them, and the [`Report`](report::Report) collects every outcome.
//!
//! ## Quick Start
//!
//! ```rust
//! use preflight_validator::prelude::*;
//!
//! struct Vars {
//!     keytab: Option<String>,
//! }
//!
//! let keytab = RuleSet::new("keytab", "kerberos").rule(Rule::check(
//!     "Validate keytab path is absolute",
//!     "krb5_keytab_path must be an absolute path",
//!     |vars: &Vars| match &vars.keytab {
//!         Some(path) => absolute_path().validate(path).map_err(|e| e.under("krb5_keytab_path")),
//!         None => Err(ValidationError::missing().under("krb5_keytab_path")),
//!     },
//! ));
//!
//! let report = Validator::new().run(&keytab, &Vars { keytab: Some("/etc/krb5.keytab".into()) });
//! assert!(report.passed());
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate value validators,
//! or implement [`Validate`](foundation::Validate) manually for complex cases.
//!
//! ## Built-in Validators
//!
//! - **String**: [`NotBlank`](validators::NotBlank), [`AbsolutePath`](validators::AbsolutePath),
//!   [`NoWhitespace`](validators::NoWhitespace), [`MatchesPattern`](validators::MatchesPattern),
//!   [`OneOf`](validators::OneOf)
//! - **Network**: [`Hostname`](validators::Hostname)
//! - **Collection**: [`NonEmpty`](validators::NonEmpty)

// Rules return ValidationError by value.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod report;
pub mod rule;
pub mod rule_set;
pub mod validators;
