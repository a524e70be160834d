//! Configuration types for CLI verbosity and base directory resolution.

use crate::constants::{BASE_DIR_ENV, DEFAULT_BASE_DIR_NAME};
use crate::error::WatcherError;
use crate::git::{self, GitLogger};
use std::ffi::OsString;
use std::path::PathBuf;

/// Runtime configuration derived from CLI arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
}

impl Config {
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Returns the git logger matching the verbosity.
    ///
    /// Verbose runs echo every git command line to stderr; everything
    /// else stays silent and relies on tracing at debug level.
    #[must_use]
    pub fn git_logger(&self) -> GitLogger {
        if self.is_verbose() {
            git::verbose_logger
        } else {
            git::no_op_logger
        }
    }

    /// Default tracing filter used when `RUST_LOG` is not set.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            Verbosity::Verbose => "debug",
            Verbosity::Normal => "warn",
            Verbosity::Quiet => "error",
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Base directory used when none is given explicitly.
///
/// `WATCHME_BASE_DIR` wins when set and non-empty, otherwise `$HOME/.watchme`.
pub fn default_base_dir() -> Result<PathBuf, WatcherError> {
    base_dir_from(std::env::var_os(BASE_DIR_ENV), dirs::home_dir()).ok_or(WatcherError::NoHomeDir)
}

/// Resolves the base directory from an environment override and a home directory.
pub fn base_dir_from(env_value: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match env_value {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => home.map(|home| home.join(DEFAULT_BASE_DIR_NAME)),
    }
}

/// Picks the explicit base if provided, falling back to [`default_base_dir`].
pub fn resolve_base_dir(explicit: Option<PathBuf>) -> Result<PathBuf, WatcherError> {
    match explicit {
        Some(base) => Ok(base),
        None => default_base_dir(),
    }
}
