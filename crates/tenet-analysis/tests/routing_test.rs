//! Tests for trigger routing.

mod common;

use common::{catalog, descriptor};
use tenet_analysis::TriggerMatcher;

#[test]
fn test_base_module_always_selected() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    let empty = descriptor(&[], &[]);
    let selected = matcher.select_modules(&empty);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "base");
}

#[test]
fn test_ui_tag_activates_ui_not_backend() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    let d = descriptor(&["ui"], &[("src/app.rs", "fn main() {}")]);
    let selected = matcher.select_modules(&d);
    let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["base", "ui"]);
}

#[test]
fn test_keyword_matching_is_case_insensitive() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    let d = descriptor(&["UI"], &[]);
    let ids: Vec<String> = matcher
        .select_modules(&d)
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert!(ids.contains(&"ui".to_string()));
}

#[test]
fn test_keyword_matches_path_segments() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    // "frontend" appears as a path segment, not a tag.
    let d = descriptor(&[], &[("src/frontend/header.rs", "")]);
    let ids: Vec<String> = matcher
        .select_modules(&d)
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert!(ids.contains(&"ui".to_string()));
}

#[test]
fn test_path_glob_matching_ignores_case() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    // Glob is "**/components/**"; the path differs only in case and no
    // keyword occurs in it.
    let d = descriptor(&[], &[("src/Components/List.vue", "")]);
    let ids: Vec<String> = matcher
        .select_modules(&d)
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert!(ids.contains(&"ui".to_string()));
}

#[test]
fn test_path_glob_activates_module() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    let d = descriptor(&[], &[("app/db/users.rs", "")]);
    let ids: Vec<String> = matcher
        .select_modules(&d)
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert!(ids.contains(&"backend-data".to_string()));
    assert!(!ids.contains(&"ui".to_string()));
}

#[test]
fn test_binary_inclusion_no_partial_activation() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    // A weak, partial resemblance must not activate anything.
    let d = descriptor(&["u"], &[("src/main.rs", "")]);
    let selected = matcher.select_modules(&d);
    assert_eq!(selected.len(), 1, "only base should be active");
}

#[test]
fn test_selection_is_deterministic() {
    let catalog = catalog();
    let matcher = TriggerMatcher::new(&catalog);

    let d = descriptor(&["database", "ui"], &[("x/components/a.tsx", "")]);
    let first: Vec<String> = matcher
        .select_modules(&d)
        .iter()
        .map(|m| m.id.clone())
        .collect();
    for _ in 0..10 {
        let again: Vec<String> = matcher
            .select_modules(&d)
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(first, again);
    }
    // Rank order regardless of tag order.
    assert_eq!(first, vec!["base", "ui", "backend-data"]);
}
