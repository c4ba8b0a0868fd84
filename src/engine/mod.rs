//! engine
//!
//! Orchestrates the render lifecycle: Scan -> Compile -> Render.
//!
//! # Architecture
//!
//! 1. **Scan**: Read the branch set, remotes, configuration and history
//! 2. **Compile**: Assign commits to lines and emit directives
//! 3. **Render**: Format the directives (or a placeholder) as a document
//!
//! Writing the document and reporting status belong to the CLI layer.
//!
//! # Invariants
//!
//! - Scan is read-only; it never mutates the repository
//! - Compile and Render are pure given the snapshot
//!
//! # Example
//!
//! ```ignore
//! use branchviz::engine::{generate, scan, GenerateOptions};
//!
//! let snapshot = scan(&git)?;
//! let document = generate(&snapshot, &GenerateOptions::from_config(&snapshot.config));
//! println!("{}", document.text);
//! ```

pub mod generate;
pub mod scan;

pub use generate::{generate, Document, DocumentKind, GenerateOptions};
pub use scan::{scan, HistorySnapshot, ScanError};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands operate in.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> crate::ui::output::Verbosity {
        crate::ui::output::Verbosity::from_flags(self.quiet, self.debug)
    }
}
