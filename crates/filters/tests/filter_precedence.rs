//! Integration tests for rule precedence.
//!
//! Rules are checked in definition order and the last matching rule decides
//! whether a path is visited. Paths no rule matches are included.

use filters::{FilterRule, FilterSet};
use std::path::Path;

// ============================================================================
// Basic Precedence Tests
// ============================================================================

/// Later rules override earlier rules.
#[test]
fn last_matching_rule_wins() {
    let rules = [
        FilterRule::exclude("*.txt"),
        FilterRule::include("important.txt"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("important.txt"), false));
    assert!(!set.allows(Path::new("other.txt"), false));
}

#[test]
fn exclude_after_include() {
    let rules = [
        FilterRule::include("*.txt"),
        FilterRule::exclude("secret.txt"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("readme.txt"), false));
    assert!(!set.allows(Path::new("secret.txt"), false));
}

#[test]
fn alternating_rules() {
    let rules = [
        FilterRule::exclude("*"),
        FilterRule::include("*.txt"),
        FilterRule::exclude("temp.txt"),
        FilterRule::include("temp.txt"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("temp.txt"), false));
    assert!(set.allows(Path::new("notes.txt"), false));
    assert!(!set.allows(Path::new("main.rs"), false));
}

#[test]
fn unmatched_paths_default_to_include() {
    let set = FilterSet::from_rules([FilterRule::exclude("*.o")]).unwrap();

    assert!(set.allows(Path::new("src/main.rs"), false));
    assert!(set.allows(Path::new("src"), true));
}

// ============================================================================
// Directory Precedence
// ============================================================================

/// Re-including a child of an excluded directory only helps callers that
/// query the child directly; a visitor never reaches it once the parent is
/// pruned.
#[test]
fn child_include_overrides_parent_exclude_for_direct_queries() {
    let rules = [
        FilterRule::exclude("vendor/"),
        FilterRule::include("/vendor/patched/"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(!set.allows(Path::new("vendor"), true));
    assert!(set.allows(Path::new("vendor/patched"), true));
    assert!(set.allows(Path::new("vendor/patched/lib.rs"), false));
    assert!(!set.allows(Path::new("vendor/other/lib.rs"), false));
}

#[test]
fn later_directory_exclude_beats_earlier_file_include() {
    let rules = [
        FilterRule::include("*.rs"),
        FilterRule::exclude("generated/"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("src/lib.rs"), false));
    assert!(!set.allows(Path::new("generated/bindings.rs"), false));
}
