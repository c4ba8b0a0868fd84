//! render
//!
//! Turns compiler output into text documents.
//!
//! # Modules
//!
//! - [`mermaid`] - Mermaid `gitGraph` syntax
//! - [`json`] - Machine-readable directive listing
//!
//! Rendering is pure formatting. Writing the result somewhere is handled by
//! [`write_document`].

pub mod json;
pub mod mermaid;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::core::config::DEFAULT_SHORT_ID_LEN;

/// Errors from writing rendered output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize directives: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Orientation of a Mermaid gitGraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Left to right
    #[default]
    #[value(name = "LR")]
    LeftRight,
    /// Top to bottom
    #[value(name = "TB")]
    TopBottom,
    /// Bottom to top
    #[value(name = "BT")]
    BottomTop,
}

impl Direction {
    /// The keyword used in the gitGraph header.
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LR" => Ok(Direction::LeftRight),
            "TB" => Ok(Direction::TopBottom),
            "BT" => Ok(Direction::BottomTop),
            other => Err(format!(
                "invalid direction '{}', must be one of: LR, TB, BT",
                other
            )),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Mermaid gitGraph text
    #[default]
    Mermaid,
    /// JSON listing of the compiled directives
    Json,
}

/// Options shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Diagram orientation
    pub direction: Direction,
    /// Number of commit id characters to show
    pub short_id_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            short_id_len: DEFAULT_SHORT_ID_LEN,
        }
    }
}

/// Write a rendered document to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `RenderError::WriteError` if the file cannot be written.
pub fn write_document(path: &Path, document: &str) -> Result<(), RenderError> {
    let write_err = |source| RenderError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = fs::File::create(path).map_err(write_err)?;
    file.write_all(document.as_bytes()).map_err(write_err)?;
    Ok(())
}
