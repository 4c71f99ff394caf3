//! Service principal rules

use crate::realm::{REALM_EXPECTED, REALM_PATTERN};
use crate::support::{each_entry, sequence, shaped_sequence};
use preflight_config::{DeploymentConfig, Scalar};
use preflight_validator::foundation::{Validate, ValidationError};
use preflight_validator::prelude::{Rule, RuleSet};
use preflight_validator::validators::{hostname, not_blank};
use std::fmt;
use std::str::FromStr;

const EXPECTED: &str = "service/hostname@REALM";

/// A parsed `service/hostname@REALM` identity.
///
/// ```rust
/// use preflight_rules::ServicePrincipal;
///
/// let principal: ServicePrincipal = "nfs/fs01.example.com@EXAMPLE.COM".parse()?;
/// assert_eq!(principal.service, "nfs");
/// assert_eq!(principal.host, "fs01.example.com");
/// assert_eq!(principal.realm, "EXAMPLE.COM");
///
/// assert!("nfs@EXAMPLE.COM".parse::<ServicePrincipal>().is_err());
/// # Ok::<(), preflight_validator::foundation::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServicePrincipal {
    pub service: String,
    pub host: String,
    pub realm: String,
}

impl FromStr for ServicePrincipal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        not_blank().validate(s)?;

        let reject = |reason: &str| {
            ValidationError::invalid_format(s, EXPECTED)
                .with_param("reason", reason.to_owned())
        };

        let (identity, realm) = s
            .rsplit_once('@')
            .ok_or_else(|| reject("missing '@REALM' suffix"))?;
        if !REALM_PATTERN.is_match(realm) {
            return Err(reject(&format!("realm is not {REALM_EXPECTED}")));
        }

        let (service, host) = identity
            .split_once('/')
            .ok_or_else(|| reject("missing '/hostname' segment"))?;
        if service.is_empty() || service.contains(char::is_whitespace) {
            return Err(reject("empty or malformed service name"));
        }
        if let Err(e) = hostname().validate(host) {
            let reason = e.param("reason").unwrap_or("empty hostname");
            return Err(reject(&format!("hostname {reason}")));
        }

        Ok(Self {
            service: service.to_owned(),
            host: host.to_owned(),
            realm: realm.to_owned(),
        })
    }
}

impl fmt::Display for ServicePrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.service, self.host, self.realm)
    }
}

/// `required` makes an absent or empty list a failure rather than "nothing
/// to check". Otherwise only the shape of a present value is checked.
pub(crate) fn rules(
    domain: &'static str,
    tag: &'static str,
    required: bool,
) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag)
        .rule(Rule::prerequisite(
            "Validate krb5_service_principals structure",
            "krb5_service_principals must be a list, non-empty when samba or nfs-server is deployed",
            move |config: &DeploymentConfig| {
                let slot = &config.kerberos.service_principals;
                if required {
                    sequence(slot, "krb5_service_principals").map(drop)
                } else if slot.is_absent() {
                    Ok(())
                } else {
                    shaped_sequence(slot, "krb5_service_principals").map(drop)
                }
            },
        ))
        .rule(Rule::check(
            "Validate each service principal format",
            "each service principal must have the form service/hostname@REALM",
            |config: &DeploymentConfig| {
                each_entry(
                    &config.kerberos.service_principals,
                    "krb5_service_principals",
                    "a string",
                    |principal: &Scalar| principal.as_str().parse::<ServicePrincipal>().map(drop),
                )
            },
        ))
}
