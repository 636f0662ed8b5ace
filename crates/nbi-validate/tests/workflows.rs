//! Default and CSV-loaded rule bundles.

use std::path::PathBuf;

use nbi_model::{EntityKind, Severity};
use nbi_validate::{RuleRegistry, Scope, ValidateError, WorkflowSet, load_workflows};

fn write_bundle(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("bundles.csv");
    std::fs::write(&path, contents).expect("write bundle");
    path
}

#[test]
fn defaults_cover_every_dataset_twice() {
    let registry = RuleRegistry::with_default_rules();
    let workflows = WorkflowSet::defaults(&registry);
    assert_eq!(workflows.len(), EntityKind::all().len() * 2);

    for &kind in EntityKind::all() {
        let ordinary = workflows.select(kind, false).expect("ordinary");
        let border = workflows.select(kind, true).expect("border");
        assert!(!ordinary.is_empty(), "{kind}");
        assert!(!border.is_empty(), "{kind}");
        assert!(border.len() < ordinary.len(), "{kind}");
        assert!(
            border
                .rules
                .iter()
                .all(|bundled| bundled.rule.scope != Scope::Ordinary)
        );
    }

    let border_spans = workflows.get("border-span-sets").expect("border span sets");
    let names: Vec<_> = border_spans.rules.iter().map(|b| b.rule.name.as_str()).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "BSP01_REQUIRED",
        "BORDER_NO_SPAN_SETS_DATA",
    ]
    "#);
}

#[test]
fn bundle_file_overrides_metadata_and_replaces_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_bundle(
        &dir,
        "Workflow,Dataset,Rule,Severity,Fatal\n\
         bridge,Bridge,BID01_REQUIRED,,\n\
         bridge,Bridge,BLR06_REQUIRED,Critical,Y\n\
         strict-work,work,BW02_REQUIRED,Flag,no\n",
    );
    let registry = RuleRegistry::with_default_rules();
    let loaded = load_workflows(&path, &registry).expect("load bundles");
    assert_eq!(loaded.len(), 2);

    let bridge = loaded.get("bridge").expect("bridge");
    assert_eq!(bridge.kind, EntityKind::Bridge);
    assert_eq!(bridge.len(), 2);
    assert_eq!(bridge.rules[0].severity, Severity::Critical);
    assert!(bridge.rules[0].fatal);
    assert_eq!(bridge.rules[1].rule.name, "BLR06_REQUIRED");
    assert_eq!(bridge.rules[1].severity, Severity::Critical);
    assert!(bridge.rules[1].fatal);

    let work = loaded.get("strict-work").expect("work");
    assert_eq!(work.rules[0].severity, Severity::Flag);
    assert!(!work.rules[0].fatal);

    let mut workflows = WorkflowSet::defaults(&registry);
    let before = workflows.len();
    workflows.merge(loaded);
    assert_eq!(workflows.len(), before + 1);
    assert_eq!(workflows.select(EntityKind::Bridge, false).map(|w| w.len()), Some(2));
}

#[test]
fn unknown_rule_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_bundle(&dir, "Workflow,Dataset,Rule\nbridge,Bridge,NOT_A_RULE\n");
    let registry = RuleRegistry::with_default_rules();
    let err = load_workflows(&path, &registry).expect_err("unknown rule");
    assert!(matches!(err, ValidateError::UnknownRule { .. }), "{err}");
}

#[test]
fn rule_from_another_dataset_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_bundle(&dir, "Workflow,Dataset,Rule\nelements,Elements,BW02_REQUIRED\n");
    let registry = RuleRegistry::with_default_rules();
    let err = load_workflows(&path, &registry).expect_err("mismatch");
    assert!(matches!(err, ValidateError::DatasetMismatch { .. }), "{err}");
}

#[test]
fn missing_rule_column_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_bundle(&dir, "Workflow,Dataset\nbridge,Bridge\n");
    let registry = RuleRegistry::with_default_rules();
    let err = load_workflows(&path, &registry).expect_err("missing column");
    assert!(matches!(err, ValidateError::MissingColumn { ref column, .. } if column == "Rule"));
}

#[test]
fn invalid_severity_override_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_bundle(
        &dir,
        "Workflow,Dataset,Rule,Severity\nbridge,Bridge,BID01_REQUIRED,Urgent\n",
    );
    let registry = RuleRegistry::with_default_rules();
    let err = load_workflows(&path, &registry).expect_err("bad severity");
    assert!(matches!(err, ValidateError::InvalidOverride { .. }), "{err}");
}
