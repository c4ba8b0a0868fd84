//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::render::{Direction, Format};

/// branchviz - Render a repository's branch history as a Mermaid gitGraph
#[derive(Parser, Debug)]
#[command(name = "branchviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if branchviz was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the branch diagram
    #[command(
        name = "render",
        long_about = "Generate a Mermaid gitGraph of the repository's branch history.\n\n\
            Every commit reachable from any ref is drawn oldest first. Commits are \
            placed on lines named after the local branches that point at them; \
            merges name the line they came from when it can be told apart.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Write branch_visualization.mermaid.txt in the current directory
    branchviz render

    # Print the diagram instead of writing a file
    branchviz render --stdout

    # Top-to-bottom layout with longer commit ids
    branchviz render --direction TB --short-len 10

    # Inspect the compiled directives
    branchviz render --format json --stdout

VIEWING THE RESULT:
    Paste the file contents into any Mermaid renderer (e.g. https://mermaid.live)."
    )]
    Render {
        /// Output file (default from config, else branch_visualization.mermaid.txt)
        #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the document to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Mermaid)]
        format: Format,

        /// Diagram orientation
        #[arg(long, value_enum)]
        direction: Option<Direction>,

        /// Number of commit id characters to show
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(4..=64))]
        short_len: Option<u16>,
    },

    /// Show effective configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    branchviz completion bash > ~/.local/share/bash-completion/completions/branchviz

    # Zsh
    branchviz completion zsh > ~/.zfunc/_branchviz"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
