//! render::json
//!
//! JSON rendering of a compilation, for scripting and other renderers.

use super::RenderError;
use crate::core::compiler::Compilation;

/// Render a compilation as pretty-printed JSON.
///
/// Directives are tagged by `kind` (`init`, `create`, `switch`, `commit`,
/// `merge`, `commit_fallback_merge`) and carry full commit ids.
pub fn render(compilation: &Compilation) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(compilation)?)
}
