//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git reads in
//! branchviz. It produces the two inputs the compiler needs: the local
//! branch set and the oldest-first commit history with decorations.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::ObjectNotFound`]: Requested object does not exist
//! - [`GitError::Internal`]: Anything else libgit2 reports
//!
//! # Example
//!
//! ```ignore
//! use branchviz::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let branches = git.branch_set()?;
//! let history = git.history()?;
//! println!("{} commits, {} branches", history.len(), branches.len());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{BranchName, BranchSet, Commit, CommitId, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// A value read from the repository failed validation.
    #[error("invalid value from repository: {0}")]
    InvalidValue(#[from] TypeError),

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context.contains("ref") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// The Git interface.
///
/// Read-only: branchviz never writes to the repository.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository. Bare repositories are accepted.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    // =========================================================================
    // Branches and Remotes
    // =========================================================================

    /// List all local branches.
    ///
    /// Branches whose names fail validation are skipped.
    pub fn list_branches(&self) -> Result<Vec<BranchName>, GitError> {
        let branches = self
            .repo
            .branches(Some(git2::BranchType::Local))
            .map_err(|e| GitError::from_git2(e, "refs/heads"))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch?;
            if let Some(name) = branch.name().ok().flatten() {
                if let Ok(branch_name) = BranchName::new(name) {
                    names.push(branch_name);
                }
            }
        }

        Ok(names)
    }

    /// Collect the local branches into a [`BranchSet`].
    pub fn branch_set(&self) -> Result<BranchSet, GitError> {
        Ok(self.list_branches()?.into_iter().collect())
    }

    /// Names of the configured remotes.
    pub fn remote_names(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Read every commit reachable from any ref or HEAD, oldest first.
    ///
    /// Commits are ordered by commit time with parents always before their
    /// children, matching `git log --all --date-order --reverse`. Each
    /// record carries a `%D`-style decoration naming the refs at it.
    /// An empty or unborn repository yields an empty history.
    pub fn history(&self) -> Result<Vec<Commit>, GitError> {
        let mut decorations = self.decorations()?;

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME | git2::Sort::REVERSE)?;

        let mut has_tips = false;
        for tip in self.tips()? {
            walk.push(tip)?;
            has_tips = true;
        }
        if !has_tips {
            return Ok(Vec::new());
        }

        let mut commits = Vec::new();
        for oid in walk {
            let oid = oid?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| GitError::from_git2(e, &oid.to_string()))?;

            let parents = commit
                .parent_ids()
                .map(|p| CommitId::new(p.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let decoration = decorations
                .remove(&oid)
                .map(|d| d.join(", "))
                .unwrap_or_default();

            commits.push(Commit::new(
                CommitId::new(oid.to_string())?,
                parents,
                decoration,
            ));
        }

        Ok(commits)
    }

    /// Commits that refs and HEAD point at.
    fn tips(&self) -> Result<Vec<git2::Oid>, GitError> {
        let mut tips = Vec::new();
        for reference in self.repo.references()? {
            let reference = reference?;
            if let Ok(commit) = reference.peel_to_commit() {
                tips.push(commit.id());
            }
        }
        if let Some(head) = self.head_commit() {
            tips.push(head);
        }
        Ok(tips)
    }

    fn head_commit(&self) -> Option<git2::Oid> {
        let head = self.repo.head().ok()?;
        head.peel_to_commit().ok().map(|c| c.id())
    }

    /// Build `%D`-style decoration tokens for every decorated commit.
    ///
    /// Per commit: `HEAD -> <ref>` (or bare `HEAD` when detached) first,
    /// then local branches, remote-tracking branches and `tag: <name>`
    /// entries, each group sorted by name. The ref HEAD points at is not
    /// repeated, and remote symbolic refs such as `origin/HEAD` are left out.
    fn decorations(&self) -> Result<HashMap<git2::Oid, Vec<String>>, GitError> {
        let head_ref = self.head_ref();

        let mut locals: Vec<(String, git2::Oid)> = Vec::new();
        let mut remotes: Vec<(String, git2::Oid)> = Vec::new();
        let mut tags: Vec<(String, git2::Oid)> = Vec::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            if reference.kind() == Some(git2::ReferenceType::Symbolic) {
                continue;
            }
            if let (Some((head_name, _)), Some(name)) = (&head_ref, reference.name()) {
                if head_name == name {
                    continue;
                }
            }
            let Some(name) = reference.shorthand().map(String::from) else {
                continue;
            };
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };

            if reference.is_branch() {
                locals.push((name, commit.id()));
            } else if reference.is_remote() {
                remotes.push((name, commit.id()));
            } else if reference.is_tag() {
                tags.push((format!("tag: {}", name), commit.id()));
            }
        }

        locals.sort();
        remotes.sort();
        tags.sort();

        let mut decorations: HashMap<git2::Oid, Vec<String>> = HashMap::new();

        if let Some(head) = self.head_commit() {
            let token = match &head_ref {
                Some((_, short)) => format!("HEAD -> {}", short),
                None => "HEAD".to_string(),
            };
            decorations.entry(head).or_default().push(token);
        }

        for (name, oid) in locals.into_iter().chain(remotes).chain(tags) {
            decorations.entry(oid).or_default().push(name);
        }

        Ok(decorations)
    }

    /// Full and short name of the ref HEAD points at.
    ///
    /// `None` when HEAD is detached or unborn.
    fn head_ref(&self) -> Option<(String, String)> {
        if self.repo.head_detached().unwrap_or(false) {
            return None;
        }
        let head = self.repo.head().ok()?;
        let name = head.name()?.to_string();
        let short = head.shorthand()?.to_string();
        Some((name, short))
    }
}
