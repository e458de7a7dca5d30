//! End-to-end tests for the tenet binary and its exit codes.

use std::path::Path;
use std::process::Command;

const BASE_MODULE: &str = r#"
id = "base"
rank = 0

[[rules]]
id = "no-empty-handler"
title = "Error handlers must not be empty"
body = "Swallowed errors hide defects."
pillar = "error-handling"
precedence_tier = 1

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = 'catch\s*(\([^)]*\))?\s*\{\s*\}'
"#;

fn tenet() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tenet"))
}

fn write_rules(dir: &Path) -> std::path::PathBuf {
    let rules = dir.join("rules");
    std::fs::create_dir(&rules).unwrap();
    std::fs::write(rules.join("base.toml"), BASE_MODULE).unwrap();
    rules
}

#[test]
fn test_clean_file_exits_zero() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = write_rules(dir.path());
    let file = dir.path().join("clean.ts");
    std::fs::write(&file, "const a = 1;\n").unwrap();

    let output = tenet()
        .args(["check", "--rules"])
        .arg(&rules)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "{output:?}");
}

#[test]
fn test_blocking_violation_exits_one() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = write_rules(dir.path());
    let file = dir.path().join("bad.ts");
    std::fs::write(&file, "try { f(); } catch (e) {}\n").unwrap();

    let output = tenet()
        .args(["check", "--no-color", "--rules"])
        .arg(&rules)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("no-empty-handler"));
    assert!(stdout.contains("Result: BLOCKED"));
}

#[test]
fn test_broken_catalog_exits_two() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = dir.path().join("rules");
    std::fs::create_dir(&rules).unwrap();
    // Missing required rule id.
    std::fs::write(
        rules.join("base.toml"),
        r#"
id = "base"
rank = 0

[[rules]]
title = "no id"
body = "x"
precedence_tier = 1
"#,
    )
    .unwrap();
    let file = dir.path().join("clean.ts");
    std::fs::write(&file, "const a = 1;\n").unwrap();

    let output = tenet()
        .args(["check", "--rules"])
        .arg(&rules)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TENET_CATALOG_ERROR"));
}

#[test]
fn test_missing_rules_dir_exits_two() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("clean.ts");
    std::fs::write(&file, "const a = 1;\n").unwrap();

    let output = tenet()
        .args(["check", "--rules"])
        .arg(dir.path().join("nonexistent"))
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_json_format_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = write_rules(dir.path());
    let file = dir.path().join("bad.ts");
    std::fs::write(&file, "catch (e) {}\n").unwrap();

    let output = tenet()
        .args(["check", "--format", "json", "--rules"])
        .arg(&rules)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["violations"][0]["ruleId"], "no-empty-handler");
}

#[test]
fn test_empty_invocation_exits_three() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = write_rules(dir.path());

    let output = tenet()
        .args(["check", "--rules"])
        .arg(&rules)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TENET_CHECK_ERROR"));
}

#[test]
fn test_unreadable_input_exits_three_not_two() {
    // Exit 2 is reserved for a broken rule system; a missing input
    // file is the caller's problem and gets its own code.
    let dir = tempfile::TempDir::new().unwrap();
    let rules = write_rules(dir.path());

    let output = tenet()
        .args(["check", "--rules"])
        .arg(&rules)
        .arg(dir.path().join("no-such-file.ts"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TENET_CHECK_ERROR"));
}

#[test]
fn test_rules_listing_marks_unchecked() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = dir.path().join("rules");
    std::fs::create_dir(&rules).unwrap();
    std::fs::write(
        rules.join("base.toml"),
        r#"
id = "base"
rank = 0

[[rules]]
id = "advisory-only"
title = "Judgment call"
body = "No static signature."
precedence_tier = 2
"#,
    )
    .unwrap();

    let output = tenet()
        .args(["rules", "--rules"])
        .arg(&rules)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("advisory-only"));
    assert!(stdout.contains("(unchecked)"));
}
