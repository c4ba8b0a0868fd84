//! engine::scan
//!
//! Repository scanning.
//!
//! The scanner reads everything a render needs into a [`HistorySnapshot`]:
//! - Local branch set
//! - Configured remotes
//! - Repository and global configuration
//! - Oldest-first commit history with decorations
//!
//! # Invariants
//!
//! - Scan is read-only; it never mutates the repository
//! - Scan is deterministic given the same repository state

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::{Config, ConfigError};
use crate::core::decoration::{Resolver, DEFAULT_REMOTE_PREFIX};
use crate::core::types::{BranchSet, Commit};
use crate::git::{Git, GitError};

/// Errors from scanning operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Failed to read from the repository.
    #[error("failed to read repository: {0}")]
    Git(#[from] GitError),

    /// Failed to load config.
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
}

/// Everything read from the repository for one render.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Path to the .git directory.
    pub git_dir: PathBuf,
    /// Local branches.
    pub branches: BranchSet,
    /// Configured remote names.
    pub remotes: Vec<String>,
    /// Commits, oldest first.
    pub commits: Vec<Commit>,
    /// Effective configuration.
    pub config: Config,
}

impl HistorySnapshot {
    /// Build the decoration resolver for this repository.
    pub fn resolver(&self) -> Resolver {
        resolver_for(&self.config, &self.remotes)
    }

    /// Check whether neither commits nor branches were found.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty() && self.branches.is_empty()
    }
}

/// Build the decoration resolver for a configuration and remote list.
///
/// Configured `remote_prefixes` win outright. Otherwise `origin/` plus
/// one `<remote>/` prefix per configured remote.
pub fn resolver_for(config: &Config, remotes: &[String]) -> Resolver {
    match config.remote_prefixes() {
        Some(prefixes) => Resolver::with_remote_prefixes(prefixes.iter().cloned()),
        None => Resolver::with_remote_prefixes(
            std::iter::once(DEFAULT_REMOTE_PREFIX.to_string())
                .chain(remotes.iter().map(|r| format!("{}/", r))),
        ),
    }
}

/// Scan the repository.
///
/// # Errors
///
/// Returns `ScanError` if the repository cannot be read or the
/// configuration is invalid.
pub fn scan(git: &Git) -> Result<HistorySnapshot, ScanError> {
    let config = Config::load(Some(git.git_dir()))?;
    let branches = git.branch_set()?;
    let remotes = git.remote_names()?;
    let commits = git.history()?;

    Ok(HistorySnapshot {
        git_dir: git.git_dir().to_path_buf(),
        branches,
        remotes,
        commits,
        config,
    })
}
