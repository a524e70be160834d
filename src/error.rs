//! Error type shared by every watcher operation.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    /// The cloned repository has no `watchme.cfg` at its root.
    #[error("No watchme.cfg found in {url}, aborting.")]
    InvalidSource { url: String },

    #[error("{} exists. Use --force to overwrite", .dest.display())]
    DestinationExists { dest: PathBuf },

    #[error("Invalid watcher or task name: {0:?}")]
    InvalidName(String),

    #[error("Repository {} is not a directory", .0.display())]
    RepoNotFound(PathBuf),

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("Failed to execute git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Path {} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Could not find your home directory; set WATCHME_BASE_DIR or pass --base")]
    NoHomeDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
