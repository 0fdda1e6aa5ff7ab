//! Integration test: the default rule set end-to-end via Driver.
//!
//! Uses scenario fixtures under `tests/fixtures/` to verify that the full
//! TOML → Scenario → Driver → Rule pipeline reports the expected
//! diagnostics at the expected locations.

use record_lint_core::{scenario, Config, Driver, Severity, Span};
use record_lint_rules::{default_rules, rules_from_config};
use std::path::PathBuf;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn default_driver() -> Driver {
    Driver::builder().rules(default_rules()).build()
}

// ── Happy-path: flags the canonical comparison ──

#[test]
fn flags_record_list_comparison() {
    let result = default_driver()
        .check_file(&fixture_root().join("record_list_comparison.toml"))
        .expect("fixture should load");

    assert_eq!(result.units_checked, 1);
    assert_eq!(result.expressions_checked, 1);
    assert_eq!(
        result.diagnostics.len(),
        2,
        "expected one diagnostic per operand, got {:#?}",
        result.diagnostics
    );

    for d in &result.diagnostics {
        assert_eq!(d.code, "RA001");
        assert_eq!(d.rule, "record-list-equality");
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.message, "Do not use Foo in equals because....");
        assert_eq!(d.location.line, 6);
    }

    // Sorted by column: left operand first.
    assert_eq!(result.diagnostics[0].location.column, 5);
    assert_eq!(result.diagnostics[1].location.column, 10);

    let help = result.diagnostics[0]
        .suggestion
        .as_ref()
        .expect("diagnostic carries the rule explanation");
    assert_eq!(help.message, "Here comes the rule explanation");
}

#[test]
fn diagnostics_land_inside_marked_region() {
    let s = scenario::load_file(&fixture_root().join("record_list_comparison.toml"))
        .expect("fixture should load");
    assert_eq!(s.marked_spans.len(), 1);
    let marked = s.marked_spans[0];

    let result = default_driver().check_units([s.unit()]);
    assert_eq!(result.diagnostics.len(), 2);
    for d in &result.diagnostics {
        let span = Span::new(d.location.offset, d.location.offset + d.location.length);
        assert!(
            marked.contains(span),
            "diagnostic at {}..{} outside marked region {}..{}",
            span.start(),
            span.end(),
            marked.start(),
            marked.end()
        );
    }
}

// ── Inheritance: the message names the operand's record ──

#[test]
fn inherited_property_flags_derived_record() {
    let result = default_driver()
        .check_file(&fixture_root().join("inherited_list_property.toml"))
        .expect("fixture should load");

    assert_eq!(result.diagnostics.len(), 2);
    for d in &result.diagnostics {
        assert_eq!(d.message, "Do not use Order in equals because....");
    }
}

// ── Edge case: clean records stay silent ──

#[test]
fn clean_records_produce_no_diagnostics() {
    let result = default_driver()
        .check_file(&fixture_root().join("clean_records.toml"))
        .expect("fixture should load");

    assert!(
        result.diagnostics.is_empty(),
        "clean fixture should produce no diagnostics, got {:#?}",
        result.diagnostics
    );
    // The fixture's != is never evaluated.
    assert_eq!(result.expressions_checked, 1);
}

// ── Configuration ──

#[test]
fn config_can_disable_the_rule() {
    let config = Config::parse(
        r#"
[rules.record-list-equality]
enabled = false
"#,
    )
    .expect("config parses");

    let driver = Driver::builder()
        .rules(rules_from_config(&config))
        .config(config)
        .build();
    let result = driver
        .check_file(&fixture_root().join("record_list_comparison.toml"))
        .expect("fixture should load");

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.expressions_checked, 1);
}

#[test]
fn severity_override_is_reported() {
    let config = Config::parse(
        r#"
[rules.record-list-equality]
severity = "warning"
"#,
    )
    .expect("config parses");

    let driver = Driver::builder()
        .rules(rules_from_config(&config))
        .config(config)
        .build();
    let result = driver
        .check_file(&fixture_root().join("record_list_comparison.toml"))
        .expect("fixture should load");

    assert_eq!(result.diagnostics.len(), 2);
    assert!(result.has_diagnostics_at(Severity::Warning));
    assert!(!result.has_diagnostics_at(Severity::Error));
}

// ── Discovery ──

#[test]
fn check_glob_discovers_all_fixtures() {
    let pattern = format!("{}/*.toml", fixture_root().display());
    let result = default_driver()
        .check_glob(&pattern)
        .expect("glob should succeed");

    assert_eq!(result.units_checked, 3);
    assert_eq!(result.diagnostics.len(), 4);
}
