use std::path::PathBuf;

use crate::error::Error;

/// Retrieval collaborator: resolves an archive reference to a local
/// directory holding the fully extracted tree. The directory must exist
/// before this returns; any failure is fatal for the whole run.
pub trait ArchiveProvider: Sync {
    fn fetch(&self, reference: &str) -> Result<PathBuf, Error>;
}

/// Treats each reference as the path of an already-extracted directory.
pub struct LocalDirProvider;

impl ArchiveProvider for LocalDirProvider {
    fn fetch(&self, reference: &str) -> Result<PathBuf, Error> {
        let path = PathBuf::from(reference);
        if !path.is_dir() {
            return Err(Error::Retrieve(format!(
                "not an extracted archive directory: {reference}"
            )));
        }
        Ok(path)
    }
}
