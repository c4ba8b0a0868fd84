//! render::mermaid
//!
//! Mermaid `gitGraph` rendering.
//!
//! ```text
//! gitGraph LR;
//!   checkout main
//!   commit id:"1a2b3c4"
//!   branch feature
//!   checkout feature
//!   commit id:"5d6e7f8"
//!   checkout main
//!   merge feature id:"9a0b1c2"
//! ```
//!
//! Lines are joined with `\n` and the document has no trailing newline.

use super::RenderOptions;
use crate::core::compiler::Directive;

/// Placeholder shown when the history has no commits.
pub const NO_COMMITS: &str = "No Commits Found";

/// Placeholder shown when neither commits nor branches could be read.
pub const NO_GIT_DATA: &str = "No Git data found (empty repository or Git error).";

const INDENT: &str = "  ";

/// The gitGraph header line.
fn header(options: &RenderOptions) -> String {
    format!("gitGraph {};", options.direction)
}

/// Render one directive as a gitGraph statement.
pub fn statement(directive: &Directive, options: &RenderOptions) -> String {
    let short = |id: &crate::core::types::CommitId| id.short(options.short_id_len).to_string();
    match directive {
        Directive::Init { line } | Directive::Switch { line } => format!("checkout {}", line),
        Directive::Create { line } => format!("branch {}", line),
        Directive::Commit { id } => format!("commit id:\"{}\"", short(id)),
        Directive::Merge { from, id } => format!("merge {} id:\"{}\"", from, short(id)),
        Directive::CommitFallbackMerge { id } => {
            format!("commit id:\"{}\" type:MERGE", short(id))
        }
    }
}

/// Render a directive sequence as a gitGraph document.
pub fn render(directives: &[Directive], options: &RenderOptions) -> String {
    let mut lines = Vec::with_capacity(directives.len() + 1);
    lines.push(header(options));
    lines.extend(
        directives
            .iter()
            .map(|d| format!("{}{}", INDENT, statement(d, options))),
    );
    lines.join("\n")
}

/// Render a single-commit placeholder document carrying `message`.
///
/// Used by callers in place of a compiled history when there is nothing
/// to draw.
pub fn placeholder(message: &str, options: &RenderOptions) -> String {
    format!(
        "{}\n{}commit id:\"{}\";",
        header(options),
        INDENT,
        message
    )
}
