//! branchviz - Render a repository's branch history as a Mermaid gitGraph
//!
//! branchviz reads every commit reachable from the repository's refs,
//! assigns each commit to a diagram line derived from the local branches,
//! and emits the `checkout` / `branch` / `commit` / `merge` statements of a
//! Mermaid `gitGraph`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Scan -> Compile -> Render
//! - [`core`] - Domain types, decoration resolution, the line compiler, config
//! - [`git`] - Single interface for all Git reads
//! - [`render`] - Mermaid and JSON document rendering
//! - [`ui`] - User-facing output utilities
//!
//! # Correctness Invariants
//!
//! 1. Every commit appears exactly once in the output, in history order
//! 2. A line is declared before it is first checked out, and only once
//! 3. The same history and branch set always produce the same document
//! 4. The repository is never modified

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod render;
pub mod ui;
