//! Filesystem share rules

use crate::support::{absolute, all_text, each_entry, sequence, text};
use preflight_config::{DeploymentConfig, ShareSpec};
use preflight_validator::prelude::{Rule, RuleSet};

pub(crate) fn rules(domain: &'static str, tag: &'static str) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag)
        .rule(Rule::prerequisite(
            "Validate shares configuration",
            "shares must be a non-empty list of share definitions",
            |config: &DeploymentConfig| sequence(&config.shares.shares, "shares").map(drop),
        ))
        .rule(Rule::prerequisite(
            "Validate each share has required path",
            "each share must define a path",
            |config: &DeploymentConfig| {
                each_entry(&config.shares.shares, "shares", "a mapping", |share: &ShareSpec| {
                    text(&share.path, "path").map(drop)
                })
            },
        ))
        .rule(Rule::check(
            "Validate share paths are absolute",
            "share paths must be absolute (start with '/')",
            |config: &DeploymentConfig| {
                each_entry(&config.shares.shares, "shares", "a mapping", |share: &ShareSpec| {
                    absolute(&share.path, "path")
                })
            },
        ))
        .rule(Rule::check(
            "Validate each share has owner, group and mode",
            "each share must define owner, group and mode",
            |config: &DeploymentConfig| {
                each_entry(&config.shares.shares, "shares", "a mapping", |share: &ShareSpec| {
                    all_text(&[
                        ("owner", &share.owner),
                        ("group", &share.group),
                        ("mode", &share.mode),
                    ])
                })
            },
        ))
}
