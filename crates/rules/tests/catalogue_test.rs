//! End-to-end evaluation of the rule catalogue against decoded configs.

use pretty_assertions::assert_eq;
use preflight_config::{DeploymentConfig, decode};
use preflight_rules::{Domain, Plan, Role, catalogue, validate};
use preflight_validator::prelude::{ErrorKind, Report, Selection, Validator};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

fn valid_vars() -> Value {
    json!({
        "krb5_realm": "EXAMPLE.COM",
        "krb5_kdc": "kdc.example.com",
        "krb5_keytab_path": "/etc/krb5.keytab",
        "krb5_service_principals": [
            "nfs/fs01.example.com@EXAMPLE.COM",
            "cifs/fs01.example.com@EXAMPLE.COM"
        ],
        "shares": [
            {"path": "/srv/data", "owner": "root", "group": "staff", "mode": "0775"}
        ],
        "samba_workgroup": "EXAMPLE",
        "samba_realm": "EXAMPLE.COM",
        "samba_security": "ads",
        "samba_shares": [
            {"name": "data", "path": "/srv/data", "comment": "Team data"}
        ],
        "nfs_exports": [
            {
                "path": "/srv/nfs",
                "clients": [{"host": "*.example.com", "options": "rw,sync"}],
                "security": "rw,sec=krb5p"
            }
        ]
    })
}

fn config(vars: Value) -> DeploymentConfig {
    decode("test", vars).unwrap()
}

fn run(vars: Value, roles: &[Role]) -> Report {
    validate(
        &config(vars),
        &Plan::from_roles(roles.iter().copied()),
        &Validator::new(),
    )
}

fn failed_rules(report: &Report) -> Vec<&str> {
    report.failures().map(|d| &*d.rule).collect()
}

fn failed_fields(report: &Report) -> Vec<String> {
    report
        .failures()
        .flat_map(|d| d.error.leaves())
        .filter_map(|e| e.field.as_deref().map(str::to_owned))
        .collect()
}

#[test]
fn valid_config_passes_every_rule() {
    let report = run(valid_vars(), &[]);

    assert!(report.passed());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.tally().passed, 21);
    assert_eq!(report.tally().total(), 21);
    let domains: Vec<_> = report.domains().iter().map(|d| &*d.domain).collect();
    assert_eq!(
        domains,
        ["realm", "keytab", "service_principals", "shares", "samba", "nfs_exports"]
    );
}

#[test]
fn report_text_is_exact() {
    let mut vars = valid_vars();
    vars["krb5_realm"] = json!("example.com");
    vars.as_object_mut().unwrap().remove("shares");

    let report = run(vars, &[Role::KerberosClient, Role::Shares]);

    let expected = [
        "realm",
        "  ✓ PASS Validate krb5_realm is defined and non-empty",
        "  ✗ FAIL Validate krb5_realm format",
        "      → krb5_realm: value \"example.com\" does not match an uppercase Kerberos realm (A-Z, 0-9, '.', '-') (Kerberos realms are uppercase by convention)",
        "      → krb5_realm must be uppercase (e.g. EXAMPLE.COM)",
        "  ✓ PASS Validate krb5_kdc is defined and non-empty",
        "",
        "keytab",
        "  ✓ PASS Validate keytab path is absolute",
        "",
        "service_principals",
        "  ✓ PASS Validate krb5_service_principals structure",
        "  ✓ PASS Validate each service principal format",
        "",
        "shares",
        "  ✗ FAIL Validate shares configuration",
        "      → shares: is not defined",
        "      → shares must be a non-empty list of share definitions",
        "  - SKIP Validate each share has required path (blocked by: Validate shares configuration)",
        "  - SKIP Validate share paths are absolute (blocked by: Validate shares configuration)",
        "  - SKIP Validate each share has owner, group and mode (blocked by: Validate shares configuration)",
        "",
        "RESULT: FAIL (5 passed, 2 failed, 3 skipped)",
    ]
    .join("\n");

    assert_eq!(report.to_string(), expected);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn independent_domain_failures_are_aggregated() {
    let mut vars = valid_vars();
    vars["krb5_realm"] = json!("example.com");
    vars["shares"][0]["path"] = json!("srv/data");

    let report = run(vars, &[]);

    assert_eq!(
        failed_rules(&report),
        ["Validate krb5_realm format", "Validate share paths are absolute"]
    );
    assert_eq!(failed_fields(&report), ["krb5_realm", "shares[0].path"]);
}

#[test]
fn missing_sequence_suppresses_per_element_diagnostics() {
    let mut vars = valid_vars();
    vars["shares"] = json!([]);

    let report = run(vars, &[Role::Shares]);

    assert_eq!(failed_rules(&report), ["Validate shares configuration"]);
    let shares = report.domain("shares").unwrap();
    assert_eq!(shares.tally().skipped, 3);
    assert!(failed_fields(&report).iter().all(|f| !f.starts_with("shares[")));
}

#[test]
fn validation_is_idempotent() {
    let mut vars = valid_vars();
    vars["samba_security"] = json!("workgroup");
    vars["nfs_exports"][0]["security"] = json!("rw,sec=sys");
    let config = config(vars);
    let plan = Plan::all();
    let validator = Validator::new();

    let first = validate(&config, &plan, &validator);
    let second = validate(&config, &plan, &validator);

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn each_failing_export_is_reported_by_index() {
    let mut vars = valid_vars();
    let export = vars["nfs_exports"][0].clone();
    let mut insecure = export.clone();
    insecure["security"] = json!("rw,sec=sys");
    vars["nfs_exports"] = json!([export, insecure.clone(), insecure]);

    let report = run(vars, &[Role::NfsServer]);

    assert_eq!(failed_rules(&report), ["Validate NFS exports use Kerberos security"]);
    assert_eq!(
        failed_fields(&report),
        ["nfs_exports[1].security", "nfs_exports[2].security"]
    );
    let diagnostic = report.failures().next().unwrap();
    assert_eq!(diagnostic.error.message, "2 of 3 entries failed validation");
    assert_eq!(diagnostic.error.leaves()[0].kind, ErrorKind::EnumViolation);
}

#[test]
fn export_missing_fields_blocks_later_nfs_rules() {
    let mut vars = valid_vars();
    vars["nfs_exports"] = json!([{"path": "/srv/nfs"}]);

    let report = run(vars, &[Role::NfsServer]);
    let nfs = report.domain("nfs_exports").unwrap();

    assert_eq!(failed_rules(&report), ["Validate each NFS export has required fields"]);
    assert_eq!(
        failed_fields(&report),
        ["nfs_exports[0].clients", "nfs_exports[0].security"]
    );
    assert_eq!(nfs.tally().skipped, 3);
}

#[test]
fn empty_client_list_fails_client_configuration() {
    let mut vars = valid_vars();
    vars["nfs_exports"][0]["clients"] = json!([]);

    let report = run(vars, &[Role::NfsServer]);

    assert_eq!(failed_rules(&report), ["Validate NFS export client configuration"]);
    assert_eq!(failed_fields(&report), ["nfs_exports[0].clients"]);
    let leaf = report.failures().next().unwrap().error.leaves()[0].clone();
    assert_eq!(leaf.kind, ErrorKind::StructuralViolation);
}

#[test]
fn samba_checks_continue_after_failures() {
    let mut vars = valid_vars();
    let object = vars.as_object_mut().unwrap();
    object.remove("samba_workgroup");
    object.insert("samba_realm".into(), Value::Null);
    object.insert("samba_security".into(), json!("share"));

    let report = run(vars, &[Role::Samba]);

    assert_eq!(
        failed_rules(&report),
        [
            "Validate samba_workgroup is defined",
            "Validate samba_realm is defined",
            "Validate samba_security mode",
        ]
    );
    assert_eq!(report.domain("samba").unwrap().tally().passed, 3);
}

#[test]
fn samba_share_missing_name_and_path_lists_both() {
    let mut vars = valid_vars();
    vars["samba_shares"] = json!([{"comment": "orphan"}]);

    let report = run(vars, &[Role::Samba]);
    let diagnostic = report.failures().next().unwrap();

    assert_eq!(&*diagnostic.rule, "Validate each Samba share has name and path");
    assert_eq!(
        failed_fields(&report),
        ["samba_shares[0].name", "samba_shares[0].path"]
    );
}

#[rstest]
#[case(&[Role::KerberosClient], None, true)]
#[case(&[Role::Shares, Role::KerberosClient], None, true)]
#[case(&[Role::Samba], None, false)]
#[case(&[Role::NfsServer], None, false)]
#[case(&[Role::KerberosClient], Some(json!([])), true)]
#[case(&[Role::Shares, Role::KerberosClient], Some(json!([])), true)]
#[case(&[Role::Samba], Some(json!([])), false)]
#[case(&[Role::NfsServer], Some(json!([])), false)]
fn principals_only_required_for_file_servers(
    #[case] roles: &[Role],
    #[case] principals: Option<Value>,
    #[case] passes: bool,
) {
    let mut vars = valid_vars();
    match principals {
        Some(value) => vars["krb5_service_principals"] = value,
        None => {
            vars.as_object_mut().unwrap().remove("krb5_service_principals");
        }
    }

    let report = run(vars, roles);
    let principals = report.domain("service_principals").unwrap();

    assert_eq!(principals.passed(), passes);
}

#[test]
fn empty_principal_list_passes_without_file_servers() {
    let mut vars = valid_vars();
    vars["krb5_service_principals"] = json!([]);

    let report = run(vars, &[Role::KerberosClient, Role::Shares]);

    assert!(report.passed(), "{report}");
}

#[rstest]
#[case(&[Role::KerberosClient])]
#[case(&[Role::NfsServer])]
fn malformed_principal_list_fails_whether_required_or_not(#[case] roles: &[Role]) {
    let mut vars = valid_vars();
    vars["krb5_service_principals"] = json!({"nfs": "fs01.example.com"});

    let report = run(vars, roles);

    assert_eq!(
        failed_rules(&report),
        ["Validate krb5_service_principals structure"]
    );
}

#[test]
fn malformed_principal_list_is_structural() {
    let mut vars = valid_vars();
    vars["krb5_service_principals"] = json!("nfs/fs01.example.com@EXAMPLE.COM");

    let report = run(vars, &[Role::KerberosClient]);
    let diagnostic = report.failures().next().unwrap();

    assert_eq!(&*diagnostic.rule, "Validate krb5_service_principals structure");
    assert_eq!(diagnostic.error.kind, ErrorKind::StructuralViolation);
    assert_eq!(
        diagnostic.error.to_string(),
        "krb5_service_principals: expected a sequence, found a string"
    );
}

#[test]
fn principal_missing_hostname_is_reported() {
    let mut vars = valid_vars();
    vars["krb5_service_principals"] = json!(["nfs/fs01.example.com@EXAMPLE.COM", "nfs@EXAMPLE.COM"]);

    let report = run(vars, &[Role::KerberosClient]);

    assert_eq!(failed_fields(&report), ["krb5_service_principals[1]"]);
}

#[test]
fn skipped_tags_remove_domains_from_the_report() {
    let mut vars = valid_vars();
    vars["nfs_exports"] = json!("not-a-list");

    let validator = Validator::new().with_selection(Selection::all().exclude("nfs"));
    let report = validate(&config(vars), &Plan::all(), &validator);

    assert!(report.passed());
    assert!(report.domain("nfs_exports").is_none());
}

#[test]
fn included_tags_restrict_evaluation() {
    let validator = Validator::new().with_selection(Selection::all().include("kerberos"));
    let report = validate(&config(valid_vars()), &Plan::all(), &validator);

    let domains: Vec<_> = report.domains().iter().map(|d| &*d.domain).collect();
    assert_eq!(domains, ["realm", "keytab", "service_principals"]);
}

#[test]
fn every_rule_is_a_validation_rule() {
    for set in catalogue(&Plan::all()) {
        let domain = Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == set.domain())
            .unwrap();
        for rule in set.rules() {
            let tags: Vec<_> = rule.tags().iter().map(|t| t.as_str()).collect();
            assert_eq!(tags, ["validation", domain.tag()], "{}", rule.name());
        }
    }
}

#[test]
fn json_report_carries_outcome_status() {
    let mut vars = valid_vars();
    vars["krb5_keytab_path"] = json!("etc/krb5.keytab");

    let report = run(vars, &[Role::KerberosClient]);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["passed"], json!(false));
    assert_eq!(value["domains"][1]["domain"], json!("keytab"));
    let outcome = &value["domains"][1]["outcomes"][0]["outcome"];
    assert_eq!(outcome["status"], json!("failed"));
    assert_eq!(outcome["error"]["field"], json!("krb5_keytab_path"));
    assert_eq!(outcome["error"]["kind"], json!("format_violation"));
}

proptest! {
    #[test]
    fn realm_passes_iff_uppercase_syntax(realm in "[A-Za-z0-9.\\- _]{0,24}") {
        let mut vars = valid_vars();
        vars["krb5_realm"] = json!(realm.clone());

        let report = run(vars, &[Role::KerberosClient]);
        let expected = !realm.is_empty()
            && realm.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-');

        prop_assert_eq!(report.domain("realm").unwrap().passed(), expected);
    }

    #[test]
    fn keytab_passes_iff_path_is_absolute(path in "/?[a-z0-9._/-]{1,32}") {
        let mut vars = valid_vars();
        vars["krb5_keytab_path"] = json!(path.clone());

        let report = run(vars, &[Role::KerberosClient]);

        prop_assert_eq!(report.domain("keytab").unwrap().passed(), path.starts_with('/'));
    }

    #[test]
    fn export_security_passes_iff_kerberos_flavour(
        flavour in prop::sample::select(vec!["sys", "krb5", "krb5i", "krb5p", "none"]),
    ) {
        let mut vars = valid_vars();
        vars["nfs_exports"][0]["security"] = json!(format!("rw,sec={flavour}"));

        let report = run(vars, &[Role::NfsServer]);

        prop_assert_eq!(
            report.domain("nfs_exports").unwrap().passed(),
            flavour.starts_with("krb5")
        );
    }
}
