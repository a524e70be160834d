//! Git bookkeeping for watchme watcher repositories.
//!
//! This crate provides the git side of a watcher system:
//! - Cloning and validating watcher repositories into a base directory
//! - Staging files and committing task results
//! - Stamping each task folder with its last run time

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod output;
pub mod repo;
pub mod workdir;

pub use error::WatcherError;
