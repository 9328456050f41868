use std::collections::BTreeSet;

use zipdiff_core::diff::classify;
use zipdiff_core::entry::{FileEntry, SideTree};
use zipdiff_core::expect::{self, ExpectMode, Expectations, PARAM_EXPECT_ADDS};
use zipdiff_core::filter::{NoFilter, RegexFilter};

fn file(rel: &str, len: u64) -> (String, FileEntry) {
    (
        rel.to_string(),
        FileEntry::file(format!("/left/{rel}"), len),
    )
}

fn file_at(side: &str, rel: &str, len: u64) -> (String, FileEntry) {
    (
        rel.to_string(),
        FileEntry::file(format!("/{side}/{rel}"), len),
    )
}

fn dir_at(side: &str, rel: &str) -> (String, FileEntry) {
    (rel.to_string(), FileEntry::dir(format!("/{side}/{rel}")))
}

fn tree(entries: Vec<(String, FileEntry)>) -> SideTree {
    entries.into_iter().collect()
}

/// The worked example: left {a.txt(10), b/, c.txt(5)} vs right
/// {a.txt(10), b/, c.txt(7), d.txt(1)}.
fn example_trees() -> (SideTree, SideTree) {
    let left = tree(vec![
        file_at("left", "a.txt", 10),
        dir_at("left", "b"),
        file_at("left", "c.txt", 5),
    ]);
    let right = tree(vec![
        file_at("right", "a.txt", 10),
        dir_at("right", "b"),
        file_at("right", "c.txt", 7),
        file_at("right", "d.txt", 1),
    ]);
    (left, right)
}

#[test]
fn test_worked_example_partition() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);

    assert!(diff.removed.is_empty());
    assert_eq!(
        diff.added.keys().collect::<Vec<_>>(),
        vec!["d.txt"]
    );
    let unchanged: Vec<_> = diff.unchanged.keys().cloned().collect();
    assert_eq!(unchanged, vec!["a.txt".to_string(), "b".to_string()]);
    assert_eq!(
        diff.changed.keys().collect::<Vec<_>>(),
        vec!["c.txt"]
    );
}

#[test]
fn test_partition_is_exhaustive_and_disjoint() {
    let (left, right) = example_trees();
    let union: BTreeSet<String> = left.keys().chain(right.keys()).cloned().collect();
    let diff = classify(left, right, &NoFilter);

    let mut seen = BTreeSet::new();
    let mut total = 0usize;
    for key in diff
        .added
        .keys()
        .chain(diff.removed.keys())
        .chain(diff.changed.keys())
        .chain(diff.unchanged.keys())
    {
        seen.insert(key.clone());
        total += 1;
    }
    // no key lands in two sets, and every union key lands somewhere
    assert_eq!(seen.len(), total);
    assert_eq!(seen, union);
}

#[test]
fn test_symmetry_swapping_sides_swaps_added_and_removed() {
    let (left, right) = example_trees();
    let forward = classify(left.clone(), right.clone(), &NoFilter);
    let backward = classify(right, left, &NoFilter);

    let fwd_added: BTreeSet<_> = forward.added.keys().cloned().collect();
    let bwd_removed: BTreeSet<_> = backward.removed.keys().cloned().collect();
    assert_eq!(fwd_added, bwd_removed);

    let fwd_removed: BTreeSet<_> = forward.removed.keys().cloned().collect();
    let bwd_added: BTreeSet<_> = backward.added.keys().cloned().collect();
    assert_eq!(fwd_removed, bwd_added);

    let fwd_changed: BTreeSet<_> = forward.changed.keys().cloned().collect();
    let bwd_changed: BTreeSet<_> = backward.changed.keys().cloned().collect();
    assert_eq!(fwd_changed, bwd_changed);

    let fwd_unchanged: BTreeSet<_> = forward.unchanged.keys().cloned().collect();
    let bwd_unchanged: BTreeSet<_> = backward.unchanged.keys().cloned().collect();
    assert_eq!(fwd_unchanged, bwd_unchanged);
}

#[test]
fn test_both_directories_are_unchanged() {
    let left = tree(vec![dir_at("left", "docs")]);
    let right = tree(vec![dir_at("right", "docs")]);
    let diff = classify(left, right, &NoFilter);
    assert!(diff.unchanged.contains_key("docs"));
    assert!(diff.changed.is_empty());
}

#[test]
fn test_directory_versus_file_is_changed() {
    let left = tree(vec![dir_at("left", "notes")]);
    let right = tree(vec![file_at("right", "notes", 0)]);
    let diff = classify(left, right, &NoFilter);
    assert!(diff.changed.contains_key("notes"));
    assert!(diff.unchanged.is_empty());
}

#[test]
fn test_byte_length_is_the_only_content_signal() {
    // same length, (presumably) different content: unchanged
    let left = tree(vec![file_at("left", "eq.bin", 128)]);
    let right = tree(vec![file_at("right", "eq.bin", 128)]);
    let diff = classify(left, right, &NoFilter);
    assert!(diff.unchanged.contains_key("eq.bin"));

    // different length: changed
    let left = tree(vec![file_at("left", "ne.bin", 128)]);
    let right = tree(vec![file_at("right", "ne.bin", 129)]);
    let diff = classify(left, right, &NoFilter);
    assert!(diff.changed.contains_key("ne.bin"));
}

#[test]
fn test_unchanged_stores_right_side_entry() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);
    assert_eq!(
        diff.unchanged["a.txt"].abs_path_str(),
        "/right/a.txt"
    );
}

#[test]
fn test_changed_stores_left_right_pair() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);
    let (l, r) = &diff.changed["c.txt"];
    assert_eq!(l.abs_path_str(), "/left/c.txt");
    assert_eq!(r.abs_path_str(), "/right/c.txt");
    assert_eq!(l.len(), 5);
    assert_eq!(r.len(), 7);
}

#[test]
fn test_filtered_entries_join_no_outcome_set() {
    let (left, right) = example_trees();
    let filter = RegexFilter::new(&[".*/c\\.txt"]).unwrap();
    let diff = classify(left, right, &filter);

    // c.txt was removed from both sides before classification
    assert_eq!(diff.filtered.len(), 2);
    assert!(!diff.changed.contains_key("c.txt"));
    assert!(!diff.added.contains_key("c.txt"));
    assert!(!diff.removed.contains_key("c.txt"));
    assert!(!diff.unchanged.contains_key("c.txt"));
}

#[test]
fn test_required_mode_passes_on_matched_pattern() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);

    let expectations = Expectations {
        adds: vec![".*/d\\.txt".to_string()],
        ..Default::default()
    };
    let verdict = expect::evaluate(&diff, &[], &expectations, ExpectMode::Required).unwrap();
    assert!(verdict.valid);
}

#[test]
fn test_required_mode_fails_on_unmatched_pattern() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);

    let expectations = Expectations {
        adds: vec![".*/e\\.txt".to_string()],
        ..Default::default()
    };
    let verdict = expect::evaluate(&diff, &[], &expectations, ExpectMode::Required).unwrap();
    assert!(!verdict.valid);
    assert_eq!(verdict.fails.len(), 1);
    assert!(verdict.fails[0]
        .to_string()
        .contains(".*/e\\.txt"));
}

#[test]
fn test_required_mode_matches_changed_on_relative_key() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);

    let expectations = Expectations {
        changes: vec!["c\\.txt".to_string()],
        ..Default::default()
    };
    let verdict = expect::evaluate(&diff, &[], &expectations, ExpectMode::Required).unwrap();
    assert!(verdict.valid, "changed entries match on the relative key");

    // the absolute path must NOT be the changed match target
    let expectations = Expectations {
        changes: vec!["/left/c\\.txt".to_string()],
        ..Default::default()
    };
    let verdict = expect::evaluate(&diff, &[], &expectations, ExpectMode::Required).unwrap();
    assert!(!verdict.valid);
}

#[test]
fn test_exhaustive_mode_flags_entries_outside_the_set() {
    let (left, right) = example_trees();
    let universe: Vec<FileEntry> = left
        .values()
        .cloned()
        .chain(right.values().cloned())
        .collect();
    let diff = classify(left, right, &NoFilter);

    // every .txt on the right side is claimed to be an add, but a.txt and
    // c.txt exist on both sides
    let expectations = Expectations {
        adds: vec!["/right/.*\\.txt".to_string()],
        ..Default::default()
    };

    let required =
        expect::evaluate(&diff, &universe, &expectations, ExpectMode::Required).unwrap();
    assert!(required.valid, "d.txt satisfies the pattern in required mode");

    let exhaustive =
        expect::evaluate(&diff, &universe, &expectations, ExpectMode::Exhaustive).unwrap();
    assert!(!exhaustive.valid);
    let failing: BTreeSet<String> = exhaustive
        .fails
        .iter()
        .map(|f| f.to_string())
        .collect();
    assert!(failing.iter().any(|f| f.contains("/right/a.txt")));
    assert!(failing.iter().any(|f| f.contains("/right/c.txt")));
    assert!(!failing.iter().any(|f| f.contains("/right/d.txt")));
}

#[test]
fn test_exhaustive_mode_accepts_changed_pair_paths() {
    let (left, right) = example_trees();
    let universe: Vec<FileEntry> = left
        .values()
        .cloned()
        .chain(right.values().cloned())
        .collect();
    let diff = classify(left, right, &NoFilter);

    // both halves of the changed pair are members of the changed set
    let expectations = Expectations {
        changes: vec![".*/c\\.txt".to_string()],
        ..Default::default()
    };
    let verdict =
        expect::evaluate(&diff, &universe, &expectations, ExpectMode::Exhaustive).unwrap();
    assert!(verdict.valid, "got fails: {:?}", verdict.fails);
}

#[test]
fn test_expectation_params_roundtrip_through_evaluation() {
    let (left, right) = example_trees();
    let diff = classify(left, right, &NoFilter);

    let params = std::collections::HashMap::from([(
        PARAM_EXPECT_ADDS.to_string(),
        " .*/d\\.txt ,, ".to_string(),
    )]);
    let expectations = Expectations::from_params(&params);
    let verdict = expect::evaluate(&diff, &[], &expectations, ExpectMode::Required).unwrap();
    assert!(verdict.valid);
}

#[test]
fn test_classification_with_empty_sides() {
    let diff = classify(SideTree::new(), SideTree::new(), &NoFilter);
    assert!(diff.added.is_empty());
    assert!(diff.removed.is_empty());
    assert!(diff.changed.is_empty());
    assert!(diff.unchanged.is_empty());
    assert!(diff.filtered.is_empty());
}

#[test]
fn test_one_empty_side_is_all_adds_or_removes() {
    let right = tree(vec![file("x.txt", 1), file("y.txt", 2)]);
    let diff = classify(SideTree::new(), right, &NoFilter);
    assert_eq!(diff.added.len(), 2);
    assert!(diff.removed.is_empty());

    let left = tree(vec![file("x.txt", 1)]);
    let diff = classify(left, SideTree::new(), &NoFilter);
    assert_eq!(diff.removed.len(), 1);
    assert!(diff.added.is_empty());
}
