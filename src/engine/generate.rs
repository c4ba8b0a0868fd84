//! engine::generate
//!
//! Compile a scanned history and render it as a document.
//!
//! Empty histories never reach the compiler: they are rendered as a
//! single placeholder commit instead.

use crate::core::compiler::{Compilation, LineCompiler};
use crate::core::config::Config;
use crate::render::{json, mermaid, Direction, Format, RenderError, RenderOptions};

use super::scan::HistorySnapshot;

/// Options controlling document generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    /// Output format
    pub format: Format,
    /// Renderer options
    pub render: RenderOptions,
}

impl GenerateOptions {
    /// Options taken from configuration, before any CLI overrides.
    pub fn from_config(config: &Config) -> Self {
        Self {
            format: Format::default(),
            render: RenderOptions {
                direction: config.direction(),
                short_id_len: config.short_id_len(),
            },
        }
    }

    /// Override the diagram direction.
    pub fn with_direction(mut self, direction: Option<Direction>) -> Self {
        if let Some(direction) = direction {
            self.render.direction = direction;
        }
        self
    }

    /// Override the abbreviated id length.
    pub fn with_short_id_len(mut self, len: Option<usize>) -> Self {
        if let Some(len) = len {
            self.render.short_id_len = len;
        }
        self
    }

    /// Override the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

/// What a generated document describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// A compiled history.
    Diagram(Compilation),
    /// Branches exist but no commits were found.
    NoCommits,
    /// Neither branches nor commits were found.
    NoGitData,
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// What the document describes
    pub kind: DocumentKind,
    /// The rendered text
    pub text: String,
}

/// Generate the document for `snapshot`.
///
/// # Errors
///
/// Only JSON serialization can fail.
pub fn generate(
    snapshot: &HistorySnapshot,
    options: &GenerateOptions,
) -> Result<Document, RenderError> {
    if snapshot.commits.is_empty() {
        let (kind, message) = if snapshot.is_empty() {
            (DocumentKind::NoGitData, mermaid::NO_GIT_DATA)
        } else {
            (DocumentKind::NoCommits, mermaid::NO_COMMITS)
        };
        let text = match options.format {
            Format::Mermaid => mermaid::placeholder(message, &options.render),
            Format::Json => serde_json::to_string_pretty(&serde_json::json!({
                "placeholder": message,
                "directives": [],
            }))?,
        };
        return Ok(Document { kind, text });
    }

    let compilation = LineCompiler::new(&snapshot.branches)
        .with_resolver(snapshot.resolver())
        .run(&snapshot.commits);

    let text = match options.format {
        Format::Mermaid => mermaid::render(&compilation.directives, &options.render),
        Format::Json => json::render(&compilation)?,
    };

    Ok(Document {
        kind: DocumentKind::Diagram(compilation),
        text,
    })
}
