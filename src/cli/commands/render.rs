//! render command - Generate the branch diagram
//!
//! Scans the repository, compiles the history and writes the document to
//! a file (or stdout). When the file cannot be written the document is
//! printed instead, so the result is never lost.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::engine::{generate, scan, Context, Document, DocumentKind, GenerateOptions};
use crate::git::Git;
use crate::render::{write_document, Direction, Format};
use crate::ui::output::{self, Verbosity};

/// Arguments for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output file override
    pub output: Option<PathBuf>,
    /// Print to stdout instead of writing a file
    pub stdout: bool,
    /// Output format
    pub format: Format,
    /// Direction override
    pub direction: Option<Direction>,
    /// Short id length override
    pub short_len: Option<usize>,
}

/// Generate the branch diagram for the repository at the context's directory.
pub fn render(ctx: &Context, args: &RenderArgs) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;

    // With --stdout the document owns stdout; status goes to stderr.
    let say = |message: &str| {
        if args.stdout {
            output::status(message, verbosity);
        } else {
            output::print(message, verbosity);
        }
    };

    say("Generating branch visualization...");

    let git = Git::open(&cwd).context("Failed to open repository")?;
    let snapshot = scan(&git).context("Failed to scan repository")?;

    if snapshot.branches.is_empty() {
        say("Info: No local branches found.");
    }
    output::debug(
        format!("repository: {}", snapshot.git_dir.display()),
        verbosity,
    );
    output::debug(
        format!(
            "{} commits, {} local branches, {} remotes",
            snapshot.commits.len(),
            snapshot.branches.len(),
            snapshot.remotes.len()
        ),
        verbosity,
    );
    if let Some(path) = snapshot.config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = snapshot.config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), verbosity);
    }

    let options = GenerateOptions::from_config(&snapshot.config)
        .with_format(args.format)
        .with_direction(args.direction)
        .with_short_id_len(args.short_len);
    let document = generate(&snapshot, &options).context("Failed to render document")?;
    log_summary(&document, verbosity);

    if args.stdout {
        println!("{}", document.text);
        return Ok(());
    }

    let path = args.output.clone().unwrap_or_else(|| snapshot.config.output());
    let path = if path.is_relative() {
        cwd.join(path)
    } else {
        path
    };

    match write_document(&path, &document.text) {
        Ok(()) => {
            say(&format!("Diagram saved to: {}", path.display()));
            if args.format == Format::Mermaid {
                say("Paste it into a Mermaid renderer (e.g., https://mermaid.live) to view it.");
            }
        }
        Err(err) => {
            output::warn(err, verbosity);
            println!();
            println!("--- Branch Visualization (Fallback) ---");
            println!("{}", document.text);
            println!("--- End of Branch Visualization (Fallback) ---");
        }
    }

    Ok(())
}

/// Emit debug details about what was compiled.
fn log_summary(document: &Document, verbosity: Verbosity) {
    match &document.kind {
        DocumentKind::Diagram(compilation) => {
            output::debug(format!("initial line: {}", compilation.initial_line), verbosity);
            if !compilation.created_lines.is_empty() {
                output::debug(
                    format!(
                        "created lines:\n{}",
                        output::format_list(&compilation.created_lines, "  - ")
                    ),
                    verbosity,
                );
            }
            output::debug(
                format!(
                    "{} commits drawn, {} merges, {} ambiguous merges",
                    compilation.commit_count(),
                    compilation.merge_count(),
                    compilation.fallback_merge_count()
                ),
                verbosity,
            );
        }
        DocumentKind::NoCommits => output::debug("no commits found", verbosity),
        DocumentKind::NoGitData => output::debug("no branches or commits found", verbosity),
    }
}
