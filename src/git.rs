//! Git command wrappers.
//!
//! This module provides a thin wrapper around git CLI commands,
//! handling command execution and error formatting. Every command runs
//! with the repository as an explicit working directory.

use crate::constants::GIT_DIR;
use crate::error::WatcherError;
use colored::Colorize;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Callback invoked with the working directory and arguments of every git command.
pub type GitLogger = fn(&Path, &[&str]);

/// Echoes the git command line to stderr.
pub fn verbose_logger(repo: &Path, args: &[&str]) {
    eprintln!(
        "  {} {}",
        format!("[{}]", repo.display()).dimmed(),
        format!("git {}", args.join(" ")).cyan()
    );
}

pub fn no_op_logger(_repo: &Path, _args: &[&str]) {}

/// Result of `git commit -a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    Committed,
    /// Git exited non-zero because the tree had no changes to record.
    NothingToCommit,
}

fn git_output(repo: &Path, args: &[&str], logger: GitLogger) -> Result<Output, WatcherError> {
    logger(repo, args);
    debug!(repo = %repo.display(), command = %args.join(" "), "running git");

    Command::new("git")
        .current_dir(repo)
        .args(args)
        .env("LC_ALL", "C")
        .output()
        .map_err(WatcherError::Spawn)
}

fn failure(args: &[&str], output: &Output) -> WatcherError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stderr = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };
    WatcherError::Git {
        command: args.join(" "),
        stderr,
    }
}

/// Runs a git command in `repo` and returns its trimmed stdout.
pub fn run_git(repo: &Path, args: &[&str]) -> Result<String, WatcherError> {
    run_git_logged(repo, args, no_op_logger)
}

pub fn run_git_logged(
    repo: &Path,
    args: &[&str],
    logger: GitLogger,
) -> Result<String, WatcherError> {
    let output = git_output(repo, args, logger)?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        Err(failure(args, &output))
    }
}

fn path_arg(path: &Path) -> Result<&str, WatcherError> {
    path.to_str()
        .ok_or_else(|| WatcherError::NonUtf8Path(path.to_path_buf()))
}

pub fn is_git_repo(path: &Path) -> bool {
    path.join(GIT_DIR).exists()
}

/// Clones `source` into `dest`, running git from `workdir`.
pub fn clone(
    workdir: &Path,
    source: &str,
    dest: &Path,
    logger: GitLogger,
) -> Result<(), WatcherError> {
    run_git_logged(workdir, &["clone", source, path_arg(dest)?], logger)?;
    Ok(())
}

/// Stages a single file.
pub fn add(repo: &Path, file: &Path, logger: GitLogger) -> Result<(), WatcherError> {
    run_git_logged(repo, &["add", "--", path_arg(file)?], logger)?;
    Ok(())
}

/// Commits every tracked modification with `message`.
pub fn commit_all(
    repo: &Path,
    message: &str,
    logger: GitLogger,
) -> Result<CommitStatus, WatcherError> {
    let args = ["commit", "-a", "-m", message];
    let output = git_output(repo, &args, logger)?;

    if output.status.success() {
        return Ok(CommitStatus::Committed);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if is_nothing_to_commit(&stdout) {
        debug!(repo = %repo.display(), "nothing to commit");
        Ok(CommitStatus::NothingToCommit)
    } else {
        Err(failure(&args, &output))
    }
}

fn is_nothing_to_commit(stdout: &str) -> bool {
    stdout.contains("nothing to commit")
        || stdout.contains("nothing added to commit")
        || stdout.contains("no changes added to commit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_commit_detection() {
        assert!(is_nothing_to_commit(
            "On branch master\nnothing to commit, working tree clean\n"
        ));
        assert!(is_nothing_to_commit(
            "nothing added to commit but untracked files present (use \"git add\" to track)"
        ));
        assert!(is_nothing_to_commit(
            "no changes added to commit (use \"git add\" and/or \"git commit -a\")"
        ));
        assert!(!is_nothing_to_commit("fatal: unable to auto-detect email address"));
    }

    #[test]
    fn test_run_git_outside_repo_reports_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run_git(dir.path(), &["rev-parse", "HEAD"]).unwrap_err();
        match err {
            WatcherError::Git { command, .. } => assert_eq!(command, "rev-parse HEAD"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
