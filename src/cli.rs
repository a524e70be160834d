//! Command-line interface definition and dispatch.

use crate::config::{self, Config, Verbosity};
use crate::constants::DEFAULT_TIMESTAMP_FILE;
use crate::error::WatcherError;
use crate::output;
use crate::repo::{self, CloneOptions, ClonedWatcher};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "watchme-git", version, about = "Git bookkeeping for watchme watchers")]
pub struct Cli {
    /// Echo every git command and enable debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding watchers (default: $WATCHME_BASE_DIR or ~/.watchme)
    #[arg(long, global = true, value_name = "DIR")]
    pub base: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clone a watcher repository into the base directory
    Clone {
        source: String,
        /// Name of the watcher (default: repository name)
        #[arg(long)]
        name: Option<String>,
        /// Replace an existing watcher with the same name
        #[arg(short, long)]
        force: bool,
    },
    /// Stage files in a watcher, one git add per file
    Add {
        watcher: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Commit all tracked changes for a task
    Commit {
        watcher: PathBuf,
        task: String,
        message: String,
    },
    /// Write and stage the last run timestamp of a task
    Timestamp {
        watcher: PathBuf,
        task: String,
        #[arg(long, default_value = DEFAULT_TIMESTAMP_FILE)]
        filename: String,
    },
    /// Stamp a task and commit its results
    Record {
        watcher: PathBuf,
        task: String,
        message: String,
        #[arg(long, default_value = DEFAULT_TIMESTAMP_FILE)]
        filename: String,
    },
    /// List watchers in the base directory
    List,
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> Config {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Config { verbosity }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let logger = config.git_logger();
    let explicit_base = cli.base.clone();
    let base = || config::resolve_base_dir(explicit_base.clone());

    match cli.command {
        Command::Clone {
            source,
            name,
            force,
        } => {
            let options = CloneOptions {
                name,
                base: explicit_base.clone(),
                force,
            };
            let watcher = match clone_with_progress(&source, &options, &config) {
                Err(WatcherError::DestinationExists { dest })
                    if !options.force && confirm_overwrite(&dest, &config)? =>
                {
                    let options = CloneOptions {
                        force: true,
                        ..options
                    };
                    clone_with_progress(&source, &options, &config)?
                }
                result => result?,
            };
            output::print_cloned(&watcher, &config);
        }
        Command::Add { watcher, files } => {
            let repo = repo::resolve_watcher(&watcher, base)?;
            let count = repo::add(&repo, &files, logger)
                .with_context(|| format!("Failed to stage files in {}", repo.display()))?;
            output::print_staged(count, &repo, &config);
        }
        Command::Commit {
            watcher,
            task,
            message,
        } => {
            let repo = repo::resolve_watcher(&watcher, base)?;
            let status = repo::commit(&repo, &task, &message, logger)
                .with_context(|| format!("Failed to commit task '{}'", task))?;
            output::print_commit(status, &task, &config);
        }
        Command::Timestamp {
            watcher,
            task,
            filename,
        } => {
            let repo = repo::resolve_watcher(&watcher, base)?;
            let path = repo::write_timestamp(&repo, &task, &filename, logger)
                .with_context(|| format!("Failed to write timestamp for task '{}'", task))?;
            output::print_timestamp(&path, &config);
        }
        Command::Record {
            watcher,
            task,
            message,
            filename,
        } => {
            let repo = repo::resolve_watcher(&watcher, base)?;
            let outcome = repo::record(&repo, &task, &message, &filename, logger)
                .with_context(|| format!("Failed to record task '{}'", task))?;
            output::print_record(&outcome, &task, &config);
        }
        Command::List => {
            let base = base()?;
            let watchers = repo::find_watchers(&base);
            output::print_watchers(&base, &watchers, &config);
        }
    }

    Ok(())
}

fn clone_with_progress(
    source: &str,
    options: &CloneOptions,
    config: &Config,
) -> Result<ClonedWatcher, WatcherError> {
    let progress = output::create_clone_progress(config, source);
    let result = repo::clone(source, options, config.git_logger(), |step| {
        progress.update(step);
        output::print_step(config, step);
    });
    progress.finish();
    result
}

fn confirm_overwrite(dest: &Path, config: &Config) -> anyhow::Result<bool> {
    if config.is_quiet() || !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("{} exists. Overwrite it?", dest.display()))
        .default(false)
        .interact()?;
    Ok(confirmed)
}
