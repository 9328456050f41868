use std::collections::HashMap;
use std::fmt;

use crate::diff::DiffResult;
use crate::entry::FileEntry;
use crate::error::Error;
use crate::matcher::{PathMatcher, RegexMatcher};

pub const PARAM_EXPECT_ADDS: &str = "expectAdds";
pub const PARAM_EXPECT_REMOVES: &str = "expectRemoves";
pub const PARAM_EXPECT_CHANGES: &str = "expectChanges";
pub const PARAM_EXPECT_UNCHANGES: &str = "expectUnchanges";
pub const PARAM_DIFF_MODE: &str = "diffVersion";

/// Per-category pattern lists. An empty category is no constraint and
/// trivially passes.
#[derive(Debug, Clone, Default)]
pub struct Expectations {
    pub adds: Vec<String>,
    pub removes: Vec<String>,
    pub changes: Vec<String>,
    pub unchanges: Vec<String>,
}

impl Expectations {
    /// Parse the fixed parameter keys; each value is a comma-separated
    /// pattern list. Patterns are trimmed and blanks dropped.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            adds: split_patterns(params.get(PARAM_EXPECT_ADDS)),
            removes: split_patterns(params.get(PARAM_EXPECT_REMOVES)),
            changes: split_patterns(params.get(PARAM_EXPECT_CHANGES)),
            unchanges: split_patterns(params.get(PARAM_EXPECT_UNCHANGES)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty()
            && self.removes.is_empty()
            && self.changes.is_empty()
            && self.unchanges.is_empty()
    }
}

fn split_patterns(raw: Option<&String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// One explicit matching mode per run; the two are never mixed in a single
/// evaluation since they have different pass/fail semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectMode {
    /// Every pattern must match at least one entry of its category's
    /// outcome set. Answers "did these expected changes happen".
    #[default]
    Required,
    /// Every universe entry matching a category pattern must appear in
    /// that category's outcome set. Answers "did anything happen outside
    /// what the patterns predicted"; stricter than `Required`.
    Exhaustive,
}

impl ExpectMode {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, Error> {
        match params.get(PARAM_DIFF_MODE).map(|v| v.trim()) {
            None | Some("") => Ok(Self::Required),
            Some("required") | Some("1") => Ok(Self::Required),
            Some("exhaustive") | Some("2") => Ok(Self::Exhaustive),
            Some(other) => Err(Error::InvalidInput(format!(
                "unknown {PARAM_DIFF_MODE}: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "added",
            Category::Removed => "removed",
            Category::Changed => "changed",
            Category::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectFailure {
    /// Required mode: a pattern that matched nothing in its category.
    UnmatchedPattern { category: Category, pattern: String },
    /// Exhaustive mode: an entry matching a category pattern but absent
    /// from that category's outcome set.
    UnexpectedEntry { category: Category, path: String },
}

impl fmt::Display for ExpectFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectFailure::UnmatchedPattern { category, pattern } => {
                write!(f, "no {category} entry matches pattern '{pattern}'")
            }
            ExpectFailure::UnexpectedEntry { category, path } => {
                write!(f, "{path} matches an expected-{category} pattern but is not {category}")
            }
        }
    }
}

#[derive(Debug)]
pub struct Verdict {
    pub valid: bool,
    pub fails: Vec<ExpectFailure>,
}

/// Evaluate all four categories under one mode; validity is the AND over
/// categories and evaluation never short-circuits, so `fails` carries
/// every offender for reporting. Exhaustive mode runs each pattern over
/// the whole pre-filter universe, O(entries × patterns).
pub fn evaluate(
    diff: &DiffResult,
    universe: &[FileEntry],
    expectations: &Expectations,
    mode: ExpectMode,
) -> Result<Verdict, Error> {
    evaluate_with(diff, universe, expectations, mode, |pattern| {
        RegexMatcher::new(pattern).map(|m| Box::new(m) as Box<dyn PathMatcher>)
    })
}

/// As `evaluate`, with a caller-supplied matcher constructor.
pub fn evaluate_with<F>(
    diff: &DiffResult,
    universe: &[FileEntry],
    expectations: &Expectations,
    mode: ExpectMode,
    build_matcher: F,
) -> Result<Verdict, Error>
where
    F: Fn(&str) -> Result<Box<dyn PathMatcher>, Error>,
{
    let mut fails = Vec::new();

    for (category, patterns) in [
        (Category::Added, &expectations.adds),
        (Category::Removed, &expectations.removes),
        (Category::Changed, &expectations.changes),
        (Category::Unchanged, &expectations.unchanges),
    ] {
        match mode {
            ExpectMode::Required => {
                let targets = required_targets(diff, category);
                for pattern in patterns {
                    let matcher = build_matcher(pattern)?;
                    if !targets.iter().any(|t| matcher.is_match(t)) {
                        fails.push(ExpectFailure::UnmatchedPattern {
                            category,
                            pattern: pattern.clone(),
                        });
                    }
                }
            }
            ExpectMode::Exhaustive => {
                let members = set_members(diff, category);
                for pattern in patterns {
                    let matcher = build_matcher(pattern)?;
                    for entry in universe {
                        let abs = entry.abs_path_str();
                        if matcher.is_match(&abs) && !members.contains(&abs) {
                            fails.push(ExpectFailure::UnexpectedEntry {
                                category,
                                path: abs,
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(Verdict {
        valid: fails.is_empty(),
        fails,
    })
}

/// Required-mode match targets: absolute paths, except `changed`, which is
/// matched on its relative key.
fn required_targets(diff: &DiffResult, category: Category) -> Vec<String> {
    match category {
        Category::Added => diff.added.values().map(FileEntry::abs_path_str).collect(),
        Category::Removed => diff.removed.values().map(FileEntry::abs_path_str).collect(),
        Category::Unchanged => diff.unchanged.values().map(FileEntry::abs_path_str).collect(),
        Category::Changed => diff.changed.keys().cloned().collect(),
    }
}

/// Exhaustive-mode set membership is always by absolute path; a changed
/// key contributes both sides of its pair.
fn set_members(diff: &DiffResult, category: Category) -> Vec<String> {
    match category {
        Category::Added => diff.added.values().map(FileEntry::abs_path_str).collect(),
        Category::Removed => diff.removed.values().map(FileEntry::abs_path_str).collect(),
        Category::Unchanged => diff.unchanged.values().map(FileEntry::abs_path_str).collect(),
        Category::Changed => diff
            .changed
            .values()
            .flat_map(|(l, r)| [l.abs_path_str(), r.abs_path_str()])
            .collect(),
    }
}
