//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! branchviz has two configuration scopes:
//! - **Global**: User-level rendering preferences
//! - **Repo**: Repository-level output and remote settings
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$BRANCHVIZ_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/branchviz/config.toml`
//! 3. `~/.branchviz/config.toml`
//!
//! # Repo Config Location
//!
//! `.git/branchviz/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use branchviz::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("Output: {}", config.output().display());
//! println!("Direction: {}", config.direction());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::render::Direction;

/// Default file the rendered diagram is written to.
pub const DEFAULT_OUTPUT: &str = "branch_visualization.mermaid.txt";

/// Default number of commit id characters shown in the diagram.
pub const DEFAULT_SHORT_ID_LEN: usize = 7;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply defaults automatically.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if present)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from already-parsed parts.
    pub fn new(global: GlobalConfig, repo: Option<RepoConfig>) -> Self {
        Self {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads the repository config stored
    /// inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = match Self::global_candidates()
            .into_iter()
            .find(|path| path.exists())
        {
            Some(path) => (read_toml::<GlobalConfig>(&path)?, Some(path)),
            None => (GlobalConfig::default(), None),
        };

        let (repo, repo_path) = match git_dir.map(Self::repo_config_path) {
            Some(path) if path.exists() => (Some(read_toml::<RepoConfig>(&path)?), Some(path)),
            _ => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Global config locations, in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("BRANCHVIZ_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("branchviz/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".branchviz/config.toml"));
        }
        candidates
    }

    /// Get the path of the repo config inside `git_dir`.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("branchviz/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Diagram orientation. Defaults to left-to-right.
    pub fn direction(&self) -> Direction {
        self.global
            .direction
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default()
    }

    /// Abbreviated commit id length. Defaults to 7.
    pub fn short_id_len(&self) -> usize {
        self.global.short_id_len.unwrap_or(DEFAULT_SHORT_ID_LEN)
    }

    /// Output file path. Defaults to [`DEFAULT_OUTPUT`].
    pub fn output(&self) -> PathBuf {
        PathBuf::from(
            self.repo
                .as_ref()
                .and_then(|r| r.output.as_deref())
                .unwrap_or(DEFAULT_OUTPUT),
        )
    }

    /// Configured remote prefixes, if any.
    pub fn remote_prefixes(&self) -> Option<&[String]> {
        self.repo
            .as_ref()
            .and_then(|r| r.remote_prefixes.as_deref())
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
