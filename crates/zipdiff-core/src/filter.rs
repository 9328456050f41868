use crate::entry::FileEntry;
use crate::error::Error;
use crate::matcher::{PathMatcher, RegexMatcher};

/// Decides whether an entry is excluded from comparison before
/// classification. Evaluated per entry, no side effects.
pub trait EntryFilter {
    fn exclude(&self, entry: &FileEntry) -> bool;
}

/// Excludes entries whose absolute path fully matches any configured
/// pattern. Blank patterns are skipped; invalid ones fail construction.
pub struct RegexFilter {
    matchers: Vec<RegexMatcher>,
}

impl RegexFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, Error> {
        let mut matchers = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            matchers.push(RegexMatcher::new(pattern)?);
        }
        Ok(Self { matchers })
    }
}

impl EntryFilter for RegexFilter {
    fn exclude(&self, entry: &FileEntry) -> bool {
        let target = entry.abs_path_str();
        self.matchers.iter().any(|m| m.is_match(&target))
    }
}

/// Pass-through for callers with no filter configuration.
pub struct NoFilter;

impl EntryFilter for NoFilter {
    fn exclude(&self, _entry: &FileEntry) -> bool {
        false
    }
}
