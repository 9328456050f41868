use std::collections::BTreeMap;
use std::path::PathBuf;

/// What an entry is on disk: a file with a byte length, or a directory.
/// Byte length is the only content signal carried; there is no hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File { len: u64 },
    Dir,
}

/// One enumerated archive member, decoupled from any live filesystem
/// handle so classification stays a pure function over values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute location under the extracted archive root.
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn file(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File { len },
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Dir)
    }

    /// Byte length for files, 0 for directories.
    pub fn len(&self) -> u64 {
        match self.kind {
            EntryKind::File { len } => len,
            EntryKind::Dir => 0,
        }
    }

    pub fn abs_path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// One side's merged tree: normalized relative path → entry. Keys are
/// unique; a later archive root overwrites an earlier one (with a warning
/// recorded by the collector).
pub type SideTree = BTreeMap<String, FileEntry>;
