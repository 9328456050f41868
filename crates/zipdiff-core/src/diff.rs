use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{EntryKind, FileEntry, SideTree};
use crate::filter::EntryFilter;

/// Outcome of one classification run. Every post-filter relative key lands
/// in exactly one of the four sets; filtered entries land only in
/// `filtered`. Immutable after construction.
#[derive(Debug, Default)]
pub struct DiffResult {
    pub added: BTreeMap<String, FileEntry>,
    pub removed: BTreeMap<String, FileEntry>,
    /// Relative key → (left entry, right entry).
    pub changed: BTreeMap<String, (FileEntry, FileEntry)>,
    /// Stores the right-side entry.
    pub unchanged: BTreeMap<String, FileEntry>,
    pub filtered: Vec<FileEntry>,
}

/// Partition the key union of the two sides into added / removed /
/// changed / unchanged, after removing filtered entries. Pure and
/// deterministic; never depends on enumeration order.
pub fn classify(
    mut left: SideTree,
    mut right: SideTree,
    filter: &dyn EntryFilter,
) -> DiffResult {
    let mut result = DiffResult::default();

    for tree in [&mut left, &mut right] {
        let excluded: Vec<String> = tree
            .iter()
            .filter(|(_, entry)| filter.exclude(entry))
            .map(|(key, _)| key.clone())
            .collect();
        for key in excluded {
            if let Some(entry) = tree.remove(&key) {
                result.filtered.push(entry);
            }
        }
    }

    let keys: BTreeSet<String> = left.keys().chain(right.keys()).cloned().collect();
    for key in keys {
        match (left.remove(&key), right.remove(&key)) {
            (Some(l), None) => {
                result.removed.insert(key, l);
            }
            (None, Some(r)) => {
                result.added.insert(key, r);
            }
            (Some(l), Some(r)) => {
                if unchanged_pair(&l, &r) {
                    result.unchanged.insert(key, r);
                } else {
                    result.changed.insert(key, (l, r));
                }
            }
            (None, None) => {}
        }
    }

    result
}

/// Unchanged iff both sides are directories, or both are files of equal
/// byte length. A path that is a directory on one side and a file on the
/// other is always changed.
fn unchanged_pair(left: &FileEntry, right: &FileEntry) -> bool {
    match (&left.kind, &right.kind) {
        (EntryKind::Dir, EntryKind::Dir) => true,
        (EntryKind::File { len: l }, EntryKind::File { len: r }) => l == r,
        _ => false,
    }
}
