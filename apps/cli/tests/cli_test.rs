//! Exit codes and output of the `preflight` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_VARS: &str = r#"
krb5_realm: EXAMPLE.COM
krb5_kdc: kdc.example.com
krb5_keytab_path: /etc/krb5.keytab
krb5_service_principals:
  - nfs/fs01.example.com@EXAMPLE.COM
  - cifs/fs01.example.com@EXAMPLE.COM
shares:
  - path: /srv/data
    owner: root
    group: staff
    mode: "0775"
samba_workgroup: EXAMPLE
samba_realm: EXAMPLE.COM
samba_security: ads
samba_shares:
  - name: data
    path: /srv/data
nfs_exports:
  - path: /srv/nfs
    clients:
      - host: "*.example.com"
        options: rw,sync
    security: rw,sec=krb5p
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn preflight() -> Command {
    let mut cmd = Command::cargo_bin("preflight").unwrap();
    cmd.env_remove("PREFLIGHT_LOG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn valid_vars_exit_zero() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", VALID_VARS);

    preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ PASS Validate krb5_realm format"))
        .stdout(predicate::str::ends_with("RESULT: PASS (21 passed, 0 failed, 0 skipped)\n"));
}

#[test]
fn violations_exit_one_with_diagnostics() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", VALID_VARS);
    let host = write(
        &dir,
        "fs01.yml",
        "krb5_realm: example.com\nnfs_exports:\n  - path: srv/nfs\n    clients: [{host: fs02}]\n    security: rw,sec=sys\n",
    );

    preflight()
        .args(["check", "--vars"])
        .arg(&vars)
        .arg("--vars")
        .arg(&host)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ FAIL Validate krb5_realm format"))
        .stdout(predicate::str::contains("→ nfs_exports[0].path: value \"srv/nfs\""))
        .stdout(predicate::str::contains("→ nfs_exports[0].security: value \"rw,sec=sys\""))
        .stdout(predicate::str::contains("RESULT: FAIL (18 passed, 3 failed, 0 skipped)"));
}

#[test]
fn rule_failures_are_reported_once_on_stdout() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", &VALID_VARS.replace("krb5_realm: EXAMPLE.COM", "krb5_realm: example.com"));

    preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ FAIL Validate krb5_realm format"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_vars_file_exits_two() {
    preflight()
        .args(["check", "--vars", "/nonexistent/preflight/all.yml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to load deployment variables"));
}

#[test]
fn non_mapping_document_exits_two() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", "- krb5_realm: EXAMPLE.COM\n");

    preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected a mapping at the document root"));
}

#[test]
fn role_limits_evaluated_domains() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "shares.yml", "shares: []\n");

    preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .args(["--role", "shares"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("shares\n"))
        .stdout(predicate::str::contains("- SKIP Validate share paths are absolute"))
        .stdout(predicate::str::contains("realm").not());
}

#[test]
fn skip_tags_deselect_failing_domain() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", &VALID_VARS.replace("sec=krb5p", "sec=sys"));

    preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .args(["--skip-tags", "nfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nfs_exports").not());
}

#[test]
fn json_format_serializes_report() {
    let dir = TempDir::new().unwrap();
    let vars = write(&dir, "all.yml", &VALID_VARS.replace("/etc/krb5.keytab", "etc/krb5.keytab"));

    let output = preflight()
        .arg("check")
        .arg("--vars")
        .arg(&vars)
        .args(["--format", "json", "--role", "kerberos-client"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], serde_json::json!(false));
    assert_eq!(report["summary"]["failed"], serde_json::json!(1));
    assert_eq!(
        report["domains"][1]["outcomes"][0]["outcome"]["error"]["field"],
        serde_json::json!("krb5_keytab_path")
    );
}

#[test]
fn unknown_role_is_a_usage_error() {
    preflight()
        .args(["check", "--vars", "all.yml", "--role", "ntp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn rules_lists_catalogue_without_vars() {
    preflight()
        .args(["rules", "--role", "nfs-server", "--tags", "nfs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("nfs_exports\n"))
        .stdout(predicate::str::contains(
            "  prerequisite Validate nfs_exports structure  TAGS: [validation, nfs]",
        ))
        .stdout(predicate::str::contains(
            "  check        Validate NFS exports use Kerberos security  TAGS: [validation, nfs]",
        ));
}

#[test]
fn rules_json_lists_every_rule() {
    let output = preflight()
        .args(["rules", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let listing: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing.len(), 21);
    assert_eq!(listing[0]["domain"], serde_json::json!("realm"));
    assert_eq!(listing[0]["kind"], serde_json::json!("prerequisite"));
}
