use std::path::PathBuf;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::diff::{self, DiffResult};
use crate::error::Error;
use crate::expect::{self, ExpectFailure, ExpectMode, Expectations};
use crate::filter::RegexFilter;
use crate::provider::ArchiveProvider;
use crate::scanner;

pub struct DiffEngine {
    config: AppConfig,
}

/// What one validation run hands back to the host: the verdict, the full
/// classification for reporting, collector warnings, and elapsed time.
#[derive(Debug)]
pub struct Validation {
    pub valid: bool,
    pub diff: DiffResult,
    pub fails: Vec<ExpectFailure>,
    pub warnings: Vec<String>,
    pub duration: Duration,
}

impl DiffEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full validation pipeline:
    /// 1. Validate inputs (before any retrieval)
    /// 2. Fetch every archive reference of both sides in parallel
    /// 3. Collect both side trees
    /// 4. Classify (filters applied first)
    /// 5. Evaluate expectations under the configured mode
    pub fn validate(&self, provider: &dyn ArchiveProvider) -> Result<Validation, Error> {
        let start = Instant::now();

        let (left_refs, right_refs) = split_resources(&self.config.resources)?;
        let expectations = Expectations::from_params(&self.config.params);
        let mode = ExpectMode::from_params(&self.config.params)?;
        let filter = RegexFilter::new(&self.config.filters)?;

        info!(
            "Fetching {} archive(s) per side...",
            left_refs.len()
        );
        let fetch_start = Instant::now();
        let left_roots = fetch_all(provider, &left_refs)?;
        let right_roots = fetch_all(provider, &right_refs)?;
        debug!(
            "Fetch completed in {:.2}s",
            fetch_start.elapsed().as_secs_f64()
        );

        info!("Collecting trees...");
        let left = scanner::collect_side(&left_roots)?;
        let right = scanner::collect_side(&right_roots)?;
        let mut warnings = left.warnings;
        warnings.extend(right.warnings);

        let mut universe = left.all_entries;
        universe.extend(right.all_entries);

        info!(
            "Classifying {} left / {} right entries...",
            left.tree.len(),
            right.tree.len()
        );
        let diff = diff::classify(left.tree, right.tree, &filter);
        debug!(
            "Partition: {} added, {} removed, {} changed, {} unchanged, {} filtered",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len(),
            diff.unchanged.len(),
            diff.filtered.len(),
        );

        let verdict = expect::evaluate(&diff, &universe, &expectations, mode)?;

        Ok(Validation {
            valid: verdict.valid,
            diff,
            fails: verdict.fails,
            warnings,
            duration: start.elapsed(),
        })
    }
}

/// Split the two resource descriptors into reference lists and check their
/// shape. All failures here abort before any retrieval happens.
fn split_resources(resources: &[String]) -> Result<(Vec<String>, Vec<String>), Error> {
    if resources.len() != 2 {
        return Err(Error::InvalidInput(format!(
            "expected exactly two resource descriptors (left, right), got {}",
            resources.len()
        )));
    }
    let left = split_refs(&resources[0]);
    let right = split_refs(&resources[1]);
    if left.is_empty() || right.is_empty() {
        return Err(Error::InvalidInput(
            "resource descriptor is empty".to_string(),
        ));
    }
    if left.len() != right.len() {
        return Err(Error::InvalidInput(format!(
            "left resources size ({}) is not equal to right resources size ({})",
            left.len(),
            right.len()
        )));
    }
    Ok((left, right))
}

fn split_refs(descriptor: &str) -> Vec<String> {
    descriptor
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fetch one side's references in parallel. Any single failure fails the
/// whole side; no partial result is produced.
fn fetch_all(
    provider: &dyn ArchiveProvider,
    refs: &[String],
) -> Result<Vec<PathBuf>, Error> {
    refs.par_iter().map(|r| provider.fetch(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_resources_requires_two_descriptors() {
        let err = split_resources(&["left".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_split_resources_rejects_mismatched_counts() {
        let err =
            split_resources(&["a,b".to_string(), "c".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_split_resources_trims_references() {
        let (left, right) =
            split_resources(&[" a , b ".to_string(), "c,d".to_string()]).unwrap();
        assert_eq!(left, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(right, vec!["c".to_string(), "d".to_string()]);
    }
}
