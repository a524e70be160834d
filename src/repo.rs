// Watcher repository operations: clone-and-install, staging, commits, run timestamps

use crate::config;
use crate::constants::{CLONE_TMP_PREFIX, COMMIT_PREFIX, TIMESTAMP_FORMAT, WATCHME_CONFIG};
use crate::error::WatcherError;
use crate::git::{self, CommitStatus, GitLogger};
use crate::workdir::in_repo;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneStep {
    Cloning,
    Validating,
    Installing { dest: PathBuf },
    Completed,
}

impl fmt::Display for CloneStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneStep::Cloning => write!(f, "Cloning"),
            CloneStep::Validating => write!(f, "Checking for {}", WATCHME_CONFIG),
            CloneStep::Installing { dest } => write!(f, "Installing to {}", dest.display()),
            CloneStep::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Watcher name; derived from the source when absent.
    pub name: Option<String>,
    /// Base directory; resolved from the environment when absent.
    pub base: Option<PathBuf>,
    /// Replace an existing destination.
    pub force: bool,
}

#[derive(Debug)]
pub struct ClonedWatcher {
    pub name: String,
    pub path: PathBuf,
    /// Whether an existing destination was removed to make room.
    pub replaced: bool,
}

#[derive(Debug)]
pub struct RecordOutcome {
    pub timestamp_file: PathBuf,
    pub commit: CommitStatus,
}

pub fn is_watcher_repo(path: &Path) -> bool {
    path.join(WATCHME_CONFIG).is_file()
}

/// Lists watcher repositories directly under `base`, sorted by path.
pub fn find_watchers(base: &Path) -> Vec<PathBuf> {
    let mut watchers: Vec<PathBuf> = std::fs::read_dir(base)
        .into_iter()
        .flatten()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| e.path())
        .filter(|p| p.is_dir() && is_watcher_repo(p) && git::is_git_repo(p))
        .collect();
    watchers.sort();
    watchers
}

/// Resolves a CLI target to a repository directory.
///
/// A bare name is a watcher under the base directory, which is only looked
/// up then. Anything else (absolute, containing a separator, `.` or `..`)
/// is a path.
pub fn resolve_watcher<F>(target: &Path, base: F) -> Result<PathBuf, WatcherError>
where
    F: FnOnce() -> Result<PathBuf, WatcherError>,
{
    let mut components = target.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(base()?.join(target)),
        _ => Ok(target.to_path_buf()),
    }
}

/// Derives a watcher name from a clone source: its last path segment without `.git`.
pub fn watcher_name(source: &str) -> Option<String> {
    let trimmed = source.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    validate_name(name).ok()?;
    Some(name.to_string())
}

fn validate_name(name: &str) -> Result<(), WatcherError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(WatcherError::InvalidName(name.to_string())),
    }
}

/// Clones `source` and installs it as a watcher under the base directory.
///
/// The clone lands in a temporary directory inside the base first, so an
/// invalid source never touches an existing watcher. The destination is
/// only replaced when `options.force` is set.
pub fn clone<F>(
    source: &str,
    options: &CloneOptions,
    logger: GitLogger,
    on_step: F,
) -> Result<ClonedWatcher, WatcherError>
where
    F: Fn(&CloneStep),
{
    let base = config::resolve_base_dir(options.base.clone())?;
    let name = match &options.name {
        Some(name) => {
            validate_name(name)?;
            name.clone()
        }
        None => watcher_name(source).ok_or_else(|| WatcherError::InvalidName(source.to_string()))?,
    };

    std::fs::create_dir_all(&base)?;
    let staging = tempfile::Builder::new()
        .prefix(CLONE_TMP_PREFIX)
        .tempdir_in(&base)?;

    // Relative local sources resolve against the caller's directory.
    let workdir = std::env::current_dir()?;
    on_step(&CloneStep::Cloning);
    git::clone(&workdir, source, staging.path(), logger)?;

    on_step(&CloneStep::Validating);
    if !git::is_git_repo(staging.path()) || !is_watcher_repo(staging.path()) {
        return Err(WatcherError::InvalidSource {
            url: source.to_string(),
        });
    }

    let dest = base.join(&name);
    let replaced = match dest.symlink_metadata() {
        Ok(meta) => {
            if !options.force {
                return Err(WatcherError::DestinationExists { dest });
            }
            debug!(dest = %dest.display(), "removing existing destination");
            if meta.is_dir() {
                std::fs::remove_dir_all(&dest)?;
            } else {
                std::fs::remove_file(&dest)?;
            }
            true
        }
        Err(_) => false,
    };

    on_step(&CloneStep::Installing { dest: dest.clone() });
    let staged = staging.keep();
    if let Err(e) = std::fs::rename(&staged, &dest) {
        let _ = std::fs::remove_dir_all(&staged);
        return Err(e.into());
    }

    on_step(&CloneStep::Completed);
    info!(%name, replaced, "Added watcher {}", name);

    Ok(ClonedWatcher {
        name,
        path: dest,
        replaced,
    })
}

/// Stages each file with its own `git add`, in order.
pub fn add<I, P>(repo: &Path, files: I, logger: GitLogger) -> Result<usize, WatcherError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    in_repo(repo, |dir| {
        let mut staged = 0;
        for file in files {
            git::add(dir.path(), file.as_ref(), logger)?;
            staged += 1;
        }
        Ok(staged)
    })
}

pub fn commit_message(task: &str, message: &str) -> String {
    format!("{} {} {}", COMMIT_PREFIX, task, message)
}

pub fn commit(
    repo: &Path,
    task: &str,
    message: &str,
    logger: GitLogger,
) -> Result<CommitStatus, WatcherError> {
    in_repo(repo, |dir| {
        git::commit_all(dir.path(), &commit_message(task, message), logger)
    })
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Overwrites `<repo>/<task>/<filename>` with the current local time and stages it.
///
/// The task folder must already exist.
pub fn write_timestamp(
    repo: &Path,
    task: &str,
    filename: &str,
    logger: GitLogger,
) -> Result<PathBuf, WatcherError> {
    validate_name(task)?;
    validate_name(filename)?;

    in_repo(repo, |dir| {
        let relative = Path::new(task).join(filename);
        let path = dir.join(&relative);
        std::fs::write(&path, format_timestamp(&Local::now()))?;
        add(dir.path(), [&relative], logger)?;
        Ok(path)
    })
}

/// Stamps the task folder and commits the run.
pub fn record(
    repo: &Path,
    task: &str,
    message: &str,
    filename: &str,
    logger: GitLogger,
) -> Result<RecordOutcome, WatcherError> {
    let timestamp_file = write_timestamp(repo, task, filename, logger)?;
    let commit = commit(repo, task, message, logger)?;
    Ok(RecordOutcome {
        timestamp_file,
        commit,
    })
}
