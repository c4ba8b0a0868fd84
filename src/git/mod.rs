//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module should
//! import `git2`. Access is read-only and uses the `git2` crate
//! exclusively (no shelling out to the git CLI).
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Local branch and remote enumeration (the branch set provider)
//! - Oldest-first history with ref decorations (the history reader)
//!
//! # Invariants
//!
//! - No other module calls git2 directly
//! - All operations return strong types (CommitId, BranchName, Commit)

mod interface;

pub use interface::{Git, GitError};
