//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$BRANCHVIZ_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/branchviz/config.toml`
//! 3. `~/.branchviz/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/branchviz/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., direction must be a
//! Mermaid gitGraph orientation, remote prefixes must end in `/`).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::render::Direction;

/// Bounds for the abbreviated commit id length.
pub const SHORT_ID_LEN_RANGE: std::ops::RangeInclusive<usize> = 4..=64;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// direction = "TB"
/// short_id_len = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Diagram orientation ("LR", "TB" or "BT")
    pub direction: Option<String>,

    /// Number of commit id characters shown in the diagram
    pub short_id_len: Option<usize>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(direction) = &self.direction {
            direction
                .parse::<Direction>()
                .map_err(ConfigError::InvalidValue)?;
        }

        if let Some(len) = self.short_id_len {
            if !SHORT_ID_LEN_RANGE.contains(&len) {
                return Err(ConfigError::InvalidValue(format!(
                    "short_id_len must be between {} and {}, got {}",
                    SHORT_ID_LEN_RANGE.start(),
                    SHORT_ID_LEN_RANGE.end(),
                    len
                )));
            }
        }

        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// output = "docs/branches.mermaid.txt"
/// remote_prefixes = ["origin/", "upstream/"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Output file, relative to the working directory
    pub output: Option<String>,

    /// Remote prefixes stripped from HEAD targets
    pub remote_prefixes: Option<Vec<String>>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(output) = &self.output {
            if output.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "output cannot be empty".to_string(),
                ));
            }
        }

        if let Some(prefixes) = &self.remote_prefixes {
            for prefix in prefixes {
                if prefix.len() < 2 || !prefix.ends_with('/') {
                    return Err(ConfigError::InvalidValue(format!(
                        "remote prefix '{}' must be a remote name followed by '/'",
                        prefix
                    )));
                }
            }
        }

        Ok(())
    }
}
