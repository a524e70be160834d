//! Application-wide constants.
//!
//! Centralized names and formats shared by the git, repo and config modules.

/// Marker file that must exist at the root of every watcher repository.
pub const WATCHME_CONFIG: &str = "watchme.cfg";

/// Default filename for the per-task last run timestamp.
pub const DEFAULT_TIMESTAMP_FILE: &str = "TIMESTAMP";

/// strftime format of the timestamp file contents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix of every commit message written for a task.
pub const COMMIT_PREFIX: &str = "watchme";

/// Directory under the home directory holding watchers when no base is given.
pub const DEFAULT_BASE_DIR_NAME: &str = ".watchme";

/// Environment variable overriding the base directory.
///
/// Example: `WATCHME_BASE_DIR=/srv/watchers watchme-git list`
pub const BASE_DIR_ENV: &str = "WATCHME_BASE_DIR";

/// Prefix of the staging directory a clone lands in before validation.
pub const CLONE_TMP_PREFIX: &str = ".watchme-clone-";

/// Git directory name used to detect repositories.
pub const GIT_DIR: &str = ".git";

/// Spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;
