//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the history reader and branch set provider behave like
//! `git log --all --date-order --reverse --pretty=%H|%P|%D`.

use std::cell::Cell;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use branchviz::core::types::CommitId;
use branchviz::engine::{generate, scan, DocumentKind, GenerateOptions};
use branchviz::git::{Git, GitError};

/// Test fixture that creates a real git repository.
///
/// Every commit gets a distinct, increasing timestamp so history order is
/// deterministic.
struct TestRepo {
    dir: TempDir,
    clock: Cell<u64>,
}

impl TestRepo {
    /// Create an empty repository whose initial branch is `main`.
    fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Self {
            dir,
            clock: Cell::new(1_700_000_000),
        };
        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "core.editor", "true"]);
        repo
    }

    /// Create a repository with one initial commit on `main`.
    fn new() -> Self {
        let repo = Self::empty();
        repo.commit("README.md", "Initial commit");
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn open(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Run git with a fresh timestamp.
    fn git(&self, args: &[&str]) {
        let now = self.clock.get() + 60;
        self.clock.set(now);
        let date = format!("{} +0000", now);

        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .output()
            .expect("git command failed");

        if !output.status.success() {
            panic!(
                "git {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }

    /// Write a file and commit it, returning the new HEAD id.
    fn commit(&self, file: &str, message: &str) -> CommitId {
        let contents = format!("{}\n{}\n", message, self.clock.get());
        std::fs::write(self.path().join(file), contents).unwrap();
        self.git(&["add", file]);
        self.git(&["commit", "-m", message]);
        self.rev_parse("HEAD")
    }

    fn rev_parse(&self, rev: &str) -> CommitId {
        let output = Command::new("git")
            .args(["rev-parse", rev])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        CommitId::new(String::from_utf8(output.stdout).unwrap().trim()).unwrap()
    }
}

// =============================================================================
// Repository Opening
// =============================================================================

#[test]
fn open_from_subdirectory() {
    let repo = TestRepo::new();
    let subdir = repo.path().join("subdir");
    std::fs::create_dir(&subdir).unwrap();
    assert!(Git::open(&subdir).is_ok());
}

#[test]
fn open_non_repository_fails() {
    let dir = TempDir::new().unwrap();
    if Git::open(dir.path()).is_ok() {
        // The temp dir lives inside another repository; nothing to check.
        return;
    }
    assert!(matches!(
        Git::open(dir.path()),
        Err(GitError::NotARepo { .. })
    ));
}

// =============================================================================
// Branch Set Provider
// =============================================================================

#[test]
fn branch_set_lists_local_branches() {
    let repo = TestRepo::new();
    repo.git(&["branch", "feature"]);
    repo.git(&["branch", "fix/typo"]);

    let names: Vec<String> = repo
        .open()
        .branch_set()
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();

    assert_eq!(names, vec!["feature", "fix/typo", "main"]);
}

#[test]
fn branch_set_of_empty_repo_is_empty() {
    let repo = TestRepo::empty();
    assert!(repo.open().branch_set().unwrap().is_empty());
}

#[test]
fn remote_names_listed() {
    let repo = TestRepo::new();
    repo.git(&["remote", "add", "upstream", "https://example.com/repo.git"]);
    assert_eq!(repo.open().remote_names().unwrap(), vec!["upstream"]);
}

// =============================================================================
// History Reader
// =============================================================================

#[test]
fn empty_repository_has_no_history() {
    let repo = TestRepo::empty();
    assert!(repo.open().history().unwrap().is_empty());
}

#[test]
fn linear_history_oldest_first() {
    let repo = TestRepo::new();
    let c1 = repo.rev_parse("HEAD");
    let c2 = repo.commit("a.txt", "second");
    let c3 = repo.commit("b.txt", "third");

    let history = repo.open().history().unwrap();
    let ids: Vec<&CommitId> = history.iter().map(|c| &c.id).collect();
    assert_eq!(ids, vec![&c1, &c2, &c3]);

    assert!(history[0].parents.is_empty());
    assert_eq!(history[1].parents, vec![c1]);
    assert_eq!(history[2].parents, vec![c2]);

    assert_eq!(history[0].decoration_raw, "");
    assert_eq!(history[2].decoration_raw, "HEAD -> main");
}

#[test]
fn decorations_list_head_branches_remotes_and_tags() {
    let repo = TestRepo::new();
    repo.git(&["branch", "zeta"]);
    repo.git(&["branch", "alpha"]);
    repo.git(&["tag", "v1.0"]);
    repo.git(&["update-ref", "refs/remotes/origin/main", "HEAD"]);
    repo.git(&["symbolic-ref", "refs/remotes/origin/HEAD", "refs/remotes/origin/main"]);

    let history = repo.open().history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0].decoration_raw,
        "HEAD -> main, alpha, zeta, origin/main, tag: v1.0"
    );
}

#[test]
fn detached_head_is_bare_token() {
    let repo = TestRepo::new();
    let first = repo.rev_parse("HEAD");
    repo.commit("a.txt", "second");
    repo.git(&["checkout", "--detach", first.as_str()]);

    let history = repo.open().history().unwrap();
    assert_eq!(history[0].id, first);
    assert_eq!(history[0].decoration_raw, "HEAD");
    assert_eq!(history[1].decoration_raw, "main");
}

#[test]
fn history_covers_all_refs() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "side"]);
    let side = repo.commit("side.txt", "side work");
    repo.git(&["checkout", "main"]);
    let main = repo.commit("main.txt", "main work");

    let history = repo.open().history().unwrap();
    let ids: Vec<&CommitId> = history.iter().map(|c| &c.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&&side));
    assert!(ids.contains(&&main));
    // Ordered by commit time.
    assert_eq!(ids[1], &side);
    assert_eq!(ids[2], &main);
}

#[test]
fn merge_commit_parents_first_parent_first() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    let feature = repo.commit("f.txt", "feature work");
    repo.git(&["checkout", "main"]);
    let main = repo.commit("m.txt", "main work");
    repo.git(&["merge", "--no-ff", "feature", "-m", "Merge feature"]);

    let history = repo.open().history().unwrap();
    let merge = history.last().unwrap();
    assert_eq!(merge.parents, vec![main, feature]);
    assert!(merge.is_merge());
}

// =============================================================================
// End to End
// =============================================================================

#[test]
fn feature_merge_renders_branch_and_merge() {
    let repo = TestRepo::new();
    let c1 = repo.rev_parse("HEAD");
    repo.git(&["branch", "feature"]);
    let c2 = repo.commit("main.txt", "main work");
    repo.git(&["checkout", "feature"]);
    let c3 = repo.commit("feature.txt", "feature work");
    repo.git(&["checkout", "main"]);
    repo.git(&["merge", "--no-ff", "feature", "-m", "Merge feature"]);
    let c4 = repo.rev_parse("HEAD");

    let snapshot = scan(&repo.open()).unwrap();
    let document = generate(&snapshot, &GenerateOptions::default()).unwrap();

    let expected = [
        "gitGraph LR;".to_string(),
        "  checkout main".to_string(),
        format!("  commit id:\"{}\"", c1.short(7)),
        format!("  commit id:\"{}\"", c2.short(7)),
        "  branch feature".to_string(),
        "  checkout feature".to_string(),
        format!("  commit id:\"{}\"", c3.short(7)),
        "  checkout main".to_string(),
        format!("  merge feature id:\"{}\"", c4.short(7)),
    ]
    .join("\n");

    assert_eq!(document.text, expected);
}

#[test]
fn remote_head_without_local_branch_names_initial_line() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");
    // Move the only local branch under refs/remotes and point HEAD at it.
    repo.git(&["update-ref", "refs/remotes/origin/main", head.as_str()]);
    repo.git(&["symbolic-ref", "HEAD", "refs/remotes/origin/main"]);
    repo.git(&["update-ref", "-d", "refs/heads/main"]);

    let snapshot = scan(&repo.open()).unwrap();
    assert!(snapshot.branches.is_empty());
    let document = generate(&snapshot, &GenerateOptions::default()).unwrap();

    match document.kind {
        DocumentKind::Diagram(compilation) => {
            assert_eq!(compilation.initial_line.as_str(), "main");
        }
        other => panic!("expected a diagram, got {:?}", other),
    }
}

#[test]
fn empty_repository_renders_placeholder() {
    let repo = TestRepo::empty();
    let snapshot = scan(&repo.open()).unwrap();
    let document = generate(&snapshot, &GenerateOptions::default()).unwrap();
    assert_eq!(document.kind, DocumentKind::NoGitData);
    assert!(document.text.starts_with("gitGraph LR;\n  commit id:\"No Git data found"));
}
