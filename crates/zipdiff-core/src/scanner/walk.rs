use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tracing::warn;
use walkdir::WalkDir;

use crate::entry::{FileEntry, SideTree};
use crate::error::Error;

/// The collector's output for one side: the merged relative-path tree,
/// every enumerated entry pre-dedup (the file universe consumed by
/// exhaustive expectation evaluation), and any duplicate-key warnings.
#[derive(Debug)]
pub struct CollectedSide {
    pub tree: SideTree,
    pub all_entries: Vec<FileEntry>,
    pub warnings: Vec<String>,
}

/// Recursively enumerate files and directories under each archive root, in
/// root order, keyed by archive-relative path with the top-level directory
/// stripped. A key produced by more than one root is overwritten by the
/// later root; the overwrite is recorded as a warning, never silent.
pub fn collect_side(roots: &[PathBuf]) -> Result<CollectedSide, Error> {
    let mut tree = SideTree::new();
    let mut all_entries = Vec::new();
    let mut warnings = Vec::new();

    for root in roots {
        for dirent in WalkDir::new(root).min_depth(1) {
            let dirent = dirent.map_err(|e| Error::Io(e.into()))?;
            let meta = dirent.metadata().map_err(|e| Error::Io(e.into()))?;

            // The top-level directory (e.g. a versioned release folder) is
            // normalized out of every key; its own entry is skipped since
            // its name always differs between the two archives.
            if meta.is_dir() && dirent.depth() == 1 {
                continue;
            }

            let entry = if meta.is_dir() {
                FileEntry::dir(dirent.path())
            } else {
                FileEntry::file(dirent.path(), meta.len())
            };
            all_entries.push(entry.clone());

            let Some(key) = relative_key(root, dirent.path()) else {
                continue;
            };
            if tree.contains_key(&key) {
                warn!("duplicate relative path, later root wins: {}", key);
                warnings.push(format!("duplicate relative path: {}", key));
            }
            tree.insert(key, entry);
        }
    }

    Ok(CollectedSide {
        tree,
        all_entries,
        warnings,
    })
}

/// Normalized relative key for an entry under `root`: the root prefix is
/// stripped, then the leading separator, then the first remaining segment
/// up to and including its separator (the archive's top-level directory).
/// When no separator remains the last step is a no-op, so a file sitting
/// directly under the root keeps its name.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_string_lossy();
    let rel = rel.trim_start_matches(MAIN_SEPARATOR);
    if rel.is_empty() {
        return None;
    }
    match rel.split_once(MAIN_SEPARATOR) {
        Some((_, rest)) if !rest.is_empty() => Some(rest.to_string()),
        Some(_) => None,
        None => Some(rel.to_string()),
    }
}
