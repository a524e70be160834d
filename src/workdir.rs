//! Directory scoping for repository operations.
//!
//! Git commands never need the process working directory: [`in_repo`]
//! validates the repository path and hands it to the operation, which
//! passes it to each command explicitly.

use crate::error::WatcherError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A repository path checked to be an existing directory.
#[derive(Debug, Clone)]
pub struct RepoDir {
    path: PathBuf,
}

impl RepoDir {
    pub fn open(path: &Path) -> Result<Self, WatcherError> {
        if !path.is_dir() {
            return Err(WatcherError::RepoNotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

/// Runs `op` against `repo` once it is known to be a directory.
pub fn in_repo<T, F>(repo: &Path, op: F) -> Result<T, WatcherError>
where
    F: FnOnce(&RepoDir) -> Result<T, WatcherError>,
{
    let dir = RepoDir::open(repo)?;
    debug!(repo = %dir.path().display(), "entering repository scope");
    op(&dir)
}
