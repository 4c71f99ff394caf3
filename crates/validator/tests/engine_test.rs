//! Engine behaviour across several rule sets.

use pretty_assertions::assert_eq;
use preflight_validator::prelude::*;

#[derive(Default)]
struct Vars {
    realm: Option<String>,
    exports: Vec<String>,
}

fn realm_rules() -> RuleSet<Vars> {
    RuleSet::new("realm", "kerberos")
        .rule(Rule::prerequisite(
            "Validate realm is defined",
            "realm must be defined",
            |vars: &Vars| match &vars.realm {
                Some(realm) => not_blank().validate(realm).map_err(|e| e.under("realm")),
                None => Err(ValidationError::missing().under("realm")),
            },
        ))
        .rule(Rule::check(
            "Validate realm is uppercase",
            "realm must be uppercase",
            |vars: &Vars| {
                let realm = vars.realm.as_deref().unwrap_or_default();
                if realm == realm.to_uppercase() {
                    Ok(())
                } else {
                    Err(ValidationError::invalid_format(realm, "uppercase text").under("realm"))
                }
            },
        ))
}

fn export_rules() -> RuleSet<Vars> {
    RuleSet::new("exports", "nfs")
        .rule(Rule::prerequisite(
            "Validate exports structure",
            "exports must be a non-empty list",
            |vars: &Vars| non_empty().validate(&vars.exports).map_err(|e| e.under("exports")),
        ))
        .rule(Rule::check(
            "Validate export paths are absolute",
            "export paths must be absolute",
            |vars: &Vars| {
                absolute_path()
                    .each()
                    .validate(&vars.exports[..])
                    .map_err(|e| e.under("exports"))
            },
        ))
}

fn run(validator: &Validator, vars: &Vars) -> Report {
    let sets = [realm_rules(), export_rules()];
    validator.run_all(&sets, vars)
}

#[test]
fn independent_domain_failures_are_aggregated() {
    let vars = Vars {
        realm: Some("example.com".into()),
        exports: vec!["/srv/nfs".into(), "srv/other".into()],
    };

    let report = run(&Validator::new(), &vars);
    let fields: Vec<_> = report
        .failures()
        .flat_map(|d| d.error.leaves())
        .filter_map(|e| e.field.as_deref())
        .collect();

    assert!(!report.passed());
    assert_eq!(fields, ["realm", "exports[1]"]);
}

#[test]
fn prerequisite_failure_is_local_to_its_domain() {
    let vars = Vars {
        realm: None,
        exports: vec!["relative".into()],
    };

    let report = run(&Validator::new(), &vars);
    let realm = report.domain("realm").unwrap();
    assert!(realm.outcomes[1].is_skipped());

    let exports = report.domain("exports").unwrap();
    assert_eq!(exports.tally().failed, 1);
    assert!(!exports.outcomes[1].is_skipped());
}

#[test]
fn selection_limits_domains() {
    let vars = Vars::default();
    let validator = Validator::new().with_selection(Selection::all().include("nfs"));

    let report = run(&validator, &vars);
    let domains: Vec<_> = report.domains().iter().map(|d| &*d.domain).collect();
    assert_eq!(domains, ["exports"]);
}

#[test]
fn rendered_report_is_exact() {
    let vars = Vars {
        realm: Some("EXAMPLE.COM".into()),
        exports: Vec::new(),
    };

    let expected = "\
realm
  ✓ PASS Validate realm is defined
  ✓ PASS Validate realm is uppercase

exports
  ✗ FAIL Validate exports structure
      → exports: expected a non-empty sequence, found an empty sequence
      → exports must be a non-empty list
  - SKIP Validate export paths are absolute (blocked by: Validate exports structure)

RESULT: FAIL (2 passed, 1 failed, 1 skipped)";

    assert_eq!(run(&Validator::new(), &vars).to_string(), expected);
}
