use super::*;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

#[test]
fn empty_rules_allow_everything() {
    let set = FilterSet::from_rules(Vec::new()).expect("empty set");
    assert!(set.is_empty());
    assert!(set.allows(Path::new("foo"), false));
    assert!(set.allows(Path::new("foo"), true));
}

#[test]
fn exclude_rule_blocks_match_at_any_depth() {
    let set = FilterSet::from_rules([FilterRule::exclude("foo")]).expect("compiled");
    assert!(!set.allows(Path::new("foo"), false));
    assert!(!set.allows(Path::new("bar/foo"), false));
    assert!(set.allows(Path::new("foobar"), false));
}

#[test]
fn include_after_exclude_reinstates_path() {
    let rules = [
        FilterRule::exclude("foo"),
        FilterRule::include("/foo/bar.txt"),
    ];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(set.allows(Path::new("foo/bar.txt"), false));
    assert!(!set.allows(Path::new("foo/baz.txt"), false));
}

#[test]
fn anchored_pattern_matches_only_at_root() {
    let set = FilterSet::from_rules([FilterRule::exclude("/foo/bar")]).expect("compiled");
    assert!(!set.allows(Path::new("foo/bar"), false));
    assert!(set.allows(Path::new("a/foo/bar"), false));
}

#[test]
fn directory_rule_ignores_files_with_same_name() {
    let set = FilterSet::from_rules([FilterRule::exclude("build/")]).expect("compiled");
    assert!(!set.allows(Path::new("build"), true));
    assert!(set.allows(Path::new("build"), false));
    assert!(!set.allows(Path::new("dir/build/log.txt"), false));
}

#[test]
fn root_is_always_allowed() {
    let set = FilterSet::from_rules([FilterRule::exclude("*")]).expect("compiled");
    assert!(set.allows(Path::new(""), true));
    assert!(!set.allows(Path::new("anything"), false));
}

#[test]
fn decisive_rule_reports_last_match() {
    let set = FilterSet::from_rules([
        FilterRule::exclude("*.txt"),
        FilterRule::include("keep.txt"),
    ])
    .expect("compiled");

    assert_eq!(
        set.decisive_rule(Path::new("keep.txt"), false),
        Some(&FilterRule::include("keep.txt"))
    );
    assert_eq!(
        set.decisive_rule(Path::new("drop.txt"), false),
        Some(&FilterRule::exclude("*.txt"))
    );
    assert_eq!(set.decisive_rule(Path::new("main.rs"), false), None);
    assert_eq!(set.len(), 2);
    assert_eq!(set.rules().count(), 2);
}

#[test]
fn invalid_glob_reports_pattern() {
    let error = FilterSet::from_rules([FilterRule::include("ok"), FilterRule::exclude("[")])
        .expect_err("invalid glob");
    assert_eq!(error.pattern(), Some("["));
}

#[test]
fn clones_share_rules() {
    let set = FilterSet::from_rules([FilterRule::exclude("*.tmp")]).expect("compiled");
    let copy = set.clone();
    assert!(!copy.allows(Path::new("x.tmp"), false));
    assert_eq!(copy.len(), set.len());
}

fn component() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(\\.[a-z]{1,3})?"
}

fn relative_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(component(), 1..5).prop_map(|parts| parts.iter().collect())
}

proptest! {
    #[test]
    fn empty_set_allows_any_path(path in relative_path(), is_dir in any::<bool>()) {
        let set = FilterSet::default();
        prop_assert!(set.allows(&path, is_dir));
    }

    #[test]
    fn trailing_include_of_everything_wins(path in relative_path(), is_dir in any::<bool>()) {
        let set = FilterSet::from_rules([
            FilterRule::exclude("*"),
            FilterRule::include("*"),
        ]).expect("compiled");
        prop_assert!(set.allows(&path, is_dir));
    }

    #[test]
    fn excluded_directory_excludes_descendants(
        dir in relative_path(),
        leaf in component(),
    ) {
        let anchored = format!("/{}/", dir.to_string_lossy());
        let set = FilterSet::from_rules([FilterRule::exclude(anchored)]).expect("compiled");
        prop_assert!(!set.allows(&dir, true));
        prop_assert!(!set.allows(&dir.join(leaf), false));
    }
}
