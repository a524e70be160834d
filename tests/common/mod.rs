//! Test infrastructure for watchme-git integration tests.
#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use watchme_git::git::run_git;

pub const TASK: &str = "task-a";

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a watcher repository: `watchme.cfg`, one task folder, one commit.
    pub fn new() -> Result<Self> {
        Self::named("watcher-src", true)
    }

    /// Creates a repository with an initial commit but no `watchme.cfg`.
    pub fn without_config() -> Result<Self> {
        Self::named("plain-src", false)
    }

    /// Creates a repository in a directory called `dir_name`.
    pub fn named(dir_name: &str, with_config: bool) -> Result<Self> {
        Self::create(TempDir::new()?, dir_name, with_config)
    }

    /// Creates a watcher repository below the current working directory.
    pub fn in_current_dir(dir_name: &str) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix(".watchme-test-")
            .tempdir_in(".")?;
        Self::create(temp_dir, dir_name, true)
    }

    fn create(temp_dir: TempDir, dir_name: &str, with_config: bool) -> Result<Self> {
        let path = temp_dir.path().join(dir_name);
        std::fs::create_dir(&path)?;

        run_git(&path, &["init", "-b", "master"])?;
        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        if with_config {
            std::fs::write(path.join("watchme.cfg"), "[watcher]\nactive = true\n")?;
        }
        std::fs::create_dir(path.join(TASK))?;
        std::fs::write(path.join(TASK).join("result.txt"), "first\n")?;
        run_git(&path, &["add", "."])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source string usable with `git clone`.
    pub fn source(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Path of the repository relative to the current working directory.
    pub fn relative_source(&self) -> Result<String> {
        let relative = if self.path.is_absolute() {
            self.path.strip_prefix(std::env::current_dir()?)?
        } else {
            self.path.as_path()
        };
        Ok(relative.to_string_lossy().into_owned())
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        std::fs::write(self.path.join(relative), contents)?;
        Ok(())
    }

    pub fn last_commit_message(&self) -> Result<String> {
        Ok(run_git(&self.path, &["log", "-1", "--format=%s"])?)
    }

    pub fn commit_count(&self) -> Result<usize> {
        Ok(run_git(&self.path, &["rev-list", "--count", "HEAD"])?.parse()?)
    }

    pub fn staged_files(&self) -> Result<Vec<String>> {
        let output = run_git(&self.path, &["diff", "--cached", "--name-only"])?;
        Ok(output.lines().map(str::to_string).collect())
    }
}

/// Names of the entries directly inside `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

thread_local! {
    static GIT_CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Git logger recording each command line for the current test thread.
pub fn recording_logger(_repo: &Path, args: &[&str]) {
    GIT_CALLS.with(|calls| calls.borrow_mut().push(args.join(" ")));
}

pub fn recorded_calls() -> Vec<String> {
    GIT_CALLS.with(|calls| calls.borrow().clone())
}
