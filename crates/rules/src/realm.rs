//! Realm and KDC rules

use crate::support::text;
use preflight_config::DeploymentConfig;
use preflight_validator::foundation::Validate;
use preflight_validator::prelude::{Rule, RuleSet};
use preflight_validator::validators::{MatchesPattern, matches_pattern};
use regex::Regex;
use std::sync::LazyLock;

/// Kerberos realm syntax: uppercase letters, digits, dots and hyphens.
pub(crate) static REALM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9.-]+$").expect("valid realm regex"));

pub(crate) const REALM_EXPECTED: &str = "an uppercase Kerberos realm (A-Z, 0-9, '.', '-')";

pub(crate) fn realm_format() -> MatchesPattern {
    matches_pattern(REALM_PATTERN.clone(), REALM_EXPECTED)
}

pub(crate) fn rules(domain: &'static str, tag: &'static str) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag)
        .rule(Rule::prerequisite(
            "Validate krb5_realm is defined and non-empty",
            "krb5_realm must be defined and non-empty",
            |config: &DeploymentConfig| text(&config.kerberos.realm, "krb5_realm").map(drop),
        ))
        .rule(Rule::check(
            "Validate krb5_realm format",
            "krb5_realm must be uppercase (e.g. EXAMPLE.COM)",
            |config: &DeploymentConfig| {
                let realm = text(&config.kerberos.realm, "krb5_realm")?;
                realm_format()
                    .validate(realm)
                    .map_err(|e| e.with_help("Kerberos realms are uppercase by convention").under("krb5_realm"))
            },
        ))
        .rule(Rule::prerequisite(
            "Validate krb5_kdc is defined and non-empty",
            "krb5_kdc must be defined and non-empty",
            |config: &DeploymentConfig| text(&config.kerberos.kdc, "krb5_kdc").map(drop),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EXAMPLE.COM", true)]
    #[case("CORP-1.EXAMPLE.COM", true)]
    #[case("example.com", false)]
    #[case("Example.Com", false)]
    #[case("EXAMPLE COM", false)]
    #[case("EXAMPLE_COM", false)]
    fn realm_format_cases(#[case] realm: &str, #[case] ok: bool) {
        assert_eq!(realm_format().validate(realm).is_ok(), ok);
    }
}
