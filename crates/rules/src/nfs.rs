//! NFS export rules

use crate::support::{absolute, each_entry, grouped, sequence, text};
use preflight_config::{ClientSpec, DeploymentConfig, ExportSpec};
use preflight_validator::foundation::{ErrorKind, Validate, ValidationError};
use preflight_validator::prelude::{Rule, RuleSet};
use preflight_validator::validators::{no_whitespace, not_blank};

/// `sec=` flavours that authenticate through Kerberos.
pub const KERBEROS_FLAVOURS: &[&str] = &["krb5", "krb5i", "krb5p"];

/// Passes when some `sec=` option of a comma-separated option string lists
/// a Kerberos flavour. `rw,sec=krb5` passes, `rw,sec=sys` does not.
///
/// ```rust
/// use preflight_rules::kerberos_security;
///
/// assert!(kerberos_security("rw,sec=krb5").is_ok());
/// assert!(kerberos_security("sec=sys:krb5p").is_ok());
/// assert!(kerberos_security("rw,sec=sys").is_err());
/// ```
pub fn kerberos_security(options: &str) -> Result<(), ValidationError> {
    let kerberized = options
        .split(',')
        .filter_map(|option| option.trim().strip_prefix("sec="))
        .flat_map(|flavours| flavours.split(':'))
        .any(|flavour| KERBEROS_FLAVOURS.contains(&flavour));

    if kerberized {
        return Ok(());
    }

    Err(ValidationError::new(
        ErrorKind::EnumViolation,
        "kerberos_security_required",
        format!("value {options:?} has no Kerberos sec= flavour"),
    )
    .with_param("observed", format!("{options:?}"))
    .with_param("expected", "sec=krb5|krb5i|krb5p"))
}

/// Host set and optional per-client options of one access rule.
fn client_entry(client: &ClientSpec) -> Result<(), ValidationError> {
    let host = text(&client.host, "host")?;
    no_whitespace().validate(host).map_err(|e| e.under("host"))?;

    let Some(options) = client.options.optional("a scalar").map_err(|e| e.under("options"))? else {
        return Ok(());
    };
    let options = options.as_str();
    not_blank().validate(options).map_err(|e| e.under("options"))?;
    if options.split(',').any(|option| option.is_empty()) || options.contains(char::is_whitespace)
    {
        return Err(ValidationError::invalid_format(
            options,
            "a comma-separated option list without whitespace",
        )
        .under("options"));
    }
    Ok(())
}

pub(crate) fn rules(domain: &'static str, tag: &'static str) -> RuleSet<DeploymentConfig> {
    RuleSet::new(domain, tag)
        .rule(Rule::prerequisite(
            "Validate nfs_exports structure",
            "nfs_exports must be a non-empty list of export definitions",
            |config: &DeploymentConfig| sequence(&config.nfs.exports, "nfs_exports").map(drop),
        ))
        .rule(Rule::prerequisite(
            "Validate each NFS export has required fields",
            "each NFS export must define path, clients and security",
            |config: &DeploymentConfig| {
                each_entry(&config.nfs.exports, "nfs_exports", "a mapping", |export: &ExportSpec| {
                    grouped(
                        [
                            text(&export.path, "path").err(),
                            export
                                .clients
                                .require("a sequence")
                                .err()
                                .map(|e| e.under("clients")),
                            text(&export.security, "security").err(),
                        ]
                        .into_iter()
                        .flatten()
                        .collect(),
                    )
                })
            },
        ))
        .rule(Rule::check(
            "Validate NFS export paths are absolute",
            "NFS export paths must be absolute (start with '/')",
            |config: &DeploymentConfig| {
                each_entry(&config.nfs.exports, "nfs_exports", "a mapping", |export: &ExportSpec| {
                    absolute(&export.path, "path")
                })
            },
        ))
        .rule(Rule::check(
            "Validate NFS export client configuration",
            "each NFS export needs at least one client with a host and well-formed options",
            |config: &DeploymentConfig| {
                each_entry(&config.nfs.exports, "nfs_exports", "a mapping", |export: &ExportSpec| {
                    sequence(&export.clients, "clients")?;
                    each_entry(&export.clients, "clients", "a mapping", client_entry)
                })
            },
        ))
        .rule(Rule::check(
            "Validate NFS exports use Kerberos security",
            "NFS exports must use Kerberos security (sec=krb5, krb5i or krb5p)",
            |config: &DeploymentConfig| {
                each_entry(&config.nfs.exports, "nfs_exports", "a mapping", |export: &ExportSpec| {
                    let security = text(&export.security, "security")?;
                    kerberos_security(security).map_err(|e| e.under("security"))
                })
            },
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_config::{Scalar, Slot};
    use rstest::rstest;

    #[rstest]
    #[case("rw,sec=krb5", true)]
    #[case("sec=krb5i", true)]
    #[case("ro,sec=sys:krb5p,sync", true)]
    #[case("rw, sec=krb5", true)]
    #[case("rw,sec=sys", false)]
    #[case("rw,sync", false)]
    #[case("rw,sec=krb5x", false)]
    #[case("", false)]
    fn kerberos_security_cases(#[case] options: &str, #[case] ok: bool) {
        assert_eq!(kerberos_security(options).is_ok(), ok, "{options}");
    }

    fn client(host: Slot<Scalar>, options: Slot<Scalar>) -> ClientSpec {
        ClientSpec { host, options }
    }

    #[rstest]
    #[case(client(Slot::Present("*.example.com".into()), Slot::Absent), true)]
    #[case(client(Slot::Present("10.0.0.0/24".into()), Slot::Present("rw,sync".into())), true)]
    #[case(client(Slot::Absent, Slot::Present("rw".into())), false)]
    #[case(client(Slot::Present("host one".into()), Slot::Absent), false)]
    #[case(client(Slot::Present("fs01".into()), Slot::Present("rw,,sync".into())), false)]
    #[case(client(Slot::Present("fs01".into()), Slot::Present("rw, sync".into())), false)]
    #[case(client(Slot::Present("fs01".into()), Slot::Present(" ".into())), false)]
    fn client_entry_cases(#[case] client: ClientSpec, #[case] ok: bool) {
        assert_eq!(client_entry(&client).is_ok(), ok);
    }

    #[test]
    fn missing_flavour_error_names_contract() {
        let error = kerberos_security("rw,sec=sys").unwrap_err();
        assert_eq!(error.code, "kerberos_security_required");
        assert_eq!(error.param("expected"), Some("sec=krb5|krb5i|krb5p"));
    }
}
