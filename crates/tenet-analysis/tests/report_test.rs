//! Tests for report generation.

mod common;

use common::{catalog, descriptor};
use tenet_analysis::{create_reporter, ActiveRuleSet, PatternChecker, TriggerMatcher};

fn sample_report() -> tenet_analysis::CheckReport {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);
    let d = descriptor(&[], &[("src/app.ts", "catch (e) {}")]);
    let active = ActiveRuleSet::resolve(matcher.select_modules(&d));
    PatternChecker::new().check(&d, &active)
}

#[test]
fn test_console_reporter_output() {
    let report = sample_report();
    let reporter = tenet_analysis::report::console::ConsoleReporter::new(false);
    use tenet_analysis::Reporter;
    let out = reporter.generate(&report).unwrap();

    assert!(out.contains("Modules: base"));
    assert!(out.contains("blocking src/app.ts:1:1: [no-empty-handler]"));
    assert!(out.contains("Result: BLOCKED"));
    assert!(out.contains("1 blocking, 0 advisory"));
}

#[test]
fn test_json_reporter_structure() {
    let report = sample_report();
    let reporter = create_reporter("json").unwrap();
    let out = reporter.generate(&report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["loadedModules"][0], "base");
    let v = &value["violations"][0];
    assert_eq!(v["ruleId"], "no-empty-handler");
    assert_eq!(v["severity"], "blocking");
    assert_eq!(v["location"], "src/app.ts:1:1");
    assert_eq!(v["message"], "Error handlers must not be empty");
    assert!(v.get("supersededBy").is_none());
    assert!(value["duplicateWarnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_reporter_factory() {
    assert!(create_reporter("console").is_some());
    assert!(create_reporter("json").is_some());
    assert!(create_reporter("sarif").is_none());
    assert_eq!(
        tenet_analysis::report::available_formats(),
        &["console", "json"]
    );
}
