//! Samba rules

use crate::support::{absolute, all_text, each_entry, sequence, text};
use preflight_config::{DeploymentConfig, SambaShare};
use preflight_validator::foundation::{Validate, ValidationError};
use preflight_validator::prelude::{Rule, RuleSet};
use preflight_validator::validators::one_of;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Samba `security =` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    User,
    Ads,
    Domain,
}

impl SecurityMode {
    pub const NAMES: &'static [&'static str] = &["user", "ads", "domain"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ads => "ads",
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive.
impl FromStr for SecurityMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        one_of(Self::NAMES).validate(s)?;
        Ok(match s {
            "user" => Self::User,
            "ads" => Self::Ads,
            _ => Self::Domain,
        })
    }
}

pub(crate) fn rules(domain: &'static str, tag: &'static str) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag)
        .rule(Rule::check(
            "Validate samba_workgroup is defined",
            "samba_workgroup must be defined and non-empty",
            |config: &DeploymentConfig| text(&config.samba.workgroup, "samba_workgroup").map(drop),
        ))
        .rule(Rule::check(
            "Validate samba_realm is defined",
            "samba_realm must be defined and non-empty",
            |config: &DeploymentConfig| text(&config.samba.realm, "samba_realm").map(drop),
        ))
        .rule(Rule::check(
            "Validate samba_security mode",
            "samba_security must be one of: user, ads, domain",
            |config: &DeploymentConfig| {
                let mode = text(&config.samba.security, "samba_security")?;
                mode.parse::<SecurityMode>()
                    .map(drop)
                    .map_err(|e| e.under("samba_security"))
            },
        ))
        .rule(Rule::prerequisite(
            "Validate samba_shares structure",
            "samba_shares must be a non-empty list of share definitions",
            |config: &DeploymentConfig| sequence(&config.samba.shares, "samba_shares").map(drop),
        ))
        .rule(Rule::prerequisite(
            "Validate each Samba share has name and path",
            "each Samba share must define a name and a path",
            |config: &DeploymentConfig| {
                each_entry(&config.samba.shares, "samba_shares", "a mapping", |share: &SambaShare| {
                    all_text(&[("name", &share.name), ("path", &share.path)])
                })
            },
        ))
        .rule(Rule::check(
            "Validate Samba share paths are absolute",
            "Samba share paths must be absolute (start with '/')",
            |config: &DeploymentConfig| {
                each_entry(&config.samba.shares, "samba_shares", "a mapping", |share: &SambaShare| {
                    absolute(&share.path, "path")
                })
            },
        ))
}
