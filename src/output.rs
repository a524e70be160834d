//! Spinner, colored output, and result formatting.
//!
//! Everything the binary prints goes through here; the library modules
//! only log through tracing.

use crate::config::Config;
use crate::constants::PROGRESS_TICK_MS;
use crate::git::CommitStatus;
use crate::repo::{CloneStep, ClonedWatcher, RecordOutcome};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prints a step progress message in verbose mode.
pub fn print_step(config: &Config, step: &CloneStep) {
    if !config.is_verbose() {
        return;
    }
    eprintln!("  {}...", step.to_string().dimmed());
}

/// Spinner shown while a watcher is cloned.
/// Uses `Option` to avoid allocation when progress is hidden (quiet/verbose modes).
pub struct CloneProgress {
    spinner: Option<ProgressBar>,
}

impl CloneProgress {
    pub fn update(&self, step: &CloneStep) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format_step_message(step));
        }
    }

    /// Clears the spinner; the caller prints the outcome.
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Creates the clone spinner. Returns an empty tracker in quiet or verbose mode.
#[must_use]
pub fn create_clone_progress(config: &Config, source: &str) -> CloneProgress {
    let spinner = if config.is_quiet() || config.is_verbose() {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Cloning {}...", source));
        spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Some(spinner)
    };

    CloneProgress { spinner }
}

pub fn print_cloned(watcher: &ClonedWatcher, config: &Config) {
    if config.is_quiet() {
        return;
    }
    let replaced = if watcher.replaced {
        " (replaced existing)".yellow()
    } else {
        "".normal()
    };
    println!(
        "{} Added watcher {}{}",
        "✓".green(),
        watcher.name.white().bold(),
        replaced
    );
    println!("  {}", watcher.path.display().to_string().dimmed());
}

pub fn print_staged(count: usize, repo: &Path, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} staged {} file(s) in {}",
        "✓".green(),
        count,
        repo.display().to_string().white()
    );
}

pub fn print_commit(status: CommitStatus, task: &str, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!("{}", format_commit_status(status, task));
}

pub fn print_timestamp(path: &Path, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} wrote {}",
        "✓".green(),
        path.display().to_string().white()
    );
}

pub fn print_record(outcome: &RecordOutcome, task: &str, config: &Config) {
    print_timestamp(&outcome.timestamp_file, config);
    print_commit(outcome.commit, task, config);
}

pub fn print_watchers(base: &Path, watchers: &[PathBuf], config: &Config) {
    if watchers.is_empty() {
        if !config.is_quiet() {
            println!(
                "{} {}",
                "No watchers found in".yellow().bold(),
                base.display()
            );
        }
        return;
    }

    for watcher in watchers {
        let name = watcher
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if config.is_verbose() {
            println!("{} {}", name.white().bold(), watcher.display().to_string().dimmed());
        } else {
            println!("{}", name);
        }
    }
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
}

fn format_commit_status(status: CommitStatus, task: &str) -> String {
    match status {
        CommitStatus::Committed => format!("{} committed {}", "✓".green(), task),
        CommitStatus::NothingToCommit => {
            format!("{} nothing to commit for {}", "-".yellow(), task)
        }
    }
}

fn format_step_message(step: &CloneStep) -> String {
    match step {
        CloneStep::Cloning => "Cloning repository...".to_string(),
        CloneStep::Validating => "Validating watcher...".to_string(),
        CloneStep::Installing { dest } => format!("Installing to {}...", dest.display()),
        CloneStep::Completed => "Completed".to_string(),
    }
}
