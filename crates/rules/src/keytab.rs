//! Keytab rules

use crate::support::absolute;
use preflight_config::DeploymentConfig;
use preflight_validator::prelude::{Rule, RuleSet};

pub(crate) fn rules(domain: &'static str, tag: &'static str) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag).rule(Rule::check(
        "Validate keytab path is absolute",
        "krb5_keytab_path must be an absolute path (e.g. /etc/krb5.keytab)",
        |config: &DeploymentConfig| absolute(&config.kerberos.keytab_path, "krb5_keytab_path"),
    ))
}
