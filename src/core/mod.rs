//! core
//!
//! Core domain types and the history-to-diagram compiler.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitId, Line, Commit
//! - [`decoration`] - Decoration text resolution against local branches
//! - [`compiler`] - Line assignment and directive emission
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - The compiler is a pure function of its inputs
//! - Output is deterministic for a given history and branch set

pub mod compiler;
pub mod config;
pub mod decoration;
pub mod types;
