//! # preflight-rules
//!
//! The rule catalogue for a Kerberos, Samba and NFS file-server rollout.
//!
//! One [`RuleSet`] per [`Domain`], evaluated in dependency order:
//! realm, keytab and service principals before the shares and exports that
//! authenticate through them. Which domains run is decided by the
//! [`Plan`] of roles being deployed; which rules run inside them by the
//! tag [`Selection`](preflight_validator::foundation::Selection) of the
//! [`Validator`].
//!
//! ```rust
//! use preflight_config::{ConfigBuilder, ConfigSource};
//! use preflight_rules::{Plan, Role, validate};
//! use preflight_validator::prelude::Validator;
//!
//! let config = ConfigBuilder::new()
//!     .with_source(ConfigSource::inline(
//!         "vars",
//!         "krb5_realm: example.com\nkrb5_kdc: kdc.example.com\nkrb5_keytab_path: /etc/krb5.keytab",
//!     ))
//!     .build()?;
//!
//! let report = validate(&config, &Plan::from_roles([Role::KerberosClient]), &Validator::new());
//! assert!(!report.passed());
//! assert_eq!(report.failures().next().map(|d| &*d.rule), Some("Validate krb5_realm format"));
//! # Ok::<(), preflight_config::ConfigError>(())
//! ```

mod keytab;
mod nfs;
mod plan;
mod principals;
mod realm;
mod samba;
mod shares;
mod support;

pub use nfs::{KERBEROS_FLAVOURS, kerberos_security};
pub use plan::{Domain, Plan, Role};
pub use principals::ServicePrincipal;
pub use samba::SecurityMode;

use preflight_config::DeploymentConfig;
use preflight_validator::prelude::{Report, RuleSet, Validator};

/// The rule set of one domain.
///
/// Only the service principals set depends on the plan: the list is
/// required when a file server is deployed and optional otherwise.
#[must_use]
pub fn rule_set(domain: Domain, plan: &Plan) -> RuleSet<DeploymentConfig> {
    let name = domain.as_str();
    let tag = domain.tag();
    match domain {
        Domain::Realm => realm::rules(name, tag),
        Domain::Keytab => keytab::rules(name, tag),
        Domain::ServicePrincipals => principals::rules(name, tag, plan.requires_principals()),
        Domain::Shares => shares::rules(name, tag),
        Domain::Samba => samba::rules(name, tag),
        Domain::NfsExports => nfs::rules(name, tag),
    }
}

/// Rule sets for every domain the plan needs, in dependency order.
#[must_use]
pub fn catalogue(plan: &Plan) -> Vec<RuleSet<DeploymentConfig>> {
    plan.domains()
        .into_iter()
        .map(|domain| rule_set(domain, plan))
        .collect()
}

/// Validates `config` for `plan`.
pub fn validate(config: &DeploymentConfig, plan: &Plan, validator: &Validator) -> Report {
    let roles: Vec<_> = plan.roles().map(Role::as_str).collect();
    preflight_log::debug!(roles = %roles.join(","), "building rule catalogue");
    validator.run_all(&catalogue(plan), config)
}
