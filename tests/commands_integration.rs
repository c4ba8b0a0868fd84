//! Integration tests for the CLI commands.
//!
//! Command handlers are exercised directly against real repositories, and
//! the binary is driven with assert_cmd for argument handling and exit
//! codes.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use branchviz::cli::commands::{self, RenderArgs};
use branchviz::core::config::DEFAULT_OUTPUT;
use branchviz::engine::Context;
use branchviz::render::{Direction, Format};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture that creates a real git repository with a merged feature.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a repository with `main`, a `feature` branch and a merge.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "core.editor", "true"]);

        repo.commit("README.md", "Initial commit", 1);
        repo.git(&["checkout", "-b", "feature"]);
        repo.commit("feature.txt", "Feature work", 2);
        repo.git(&["checkout", "main"]);
        repo.commit("main.txt", "Main work", 3);
        repo.git_at(&["merge", "--no-ff", "feature", "-m", "Merge feature"], 4);

        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A quiet context rooted at the repository.
    fn context(&self) -> Context {
        Context {
            cwd: Some(self.path().to_path_buf()),
            debug: false,
            quiet: true,
        }
    }

    fn git(&self, args: &[&str]) {
        self.git_at(args, 0);
    }

    fn git_at(&self, args: &[&str], minute: u64) {
        let date = format!("{} +0000", 1_700_000_000 + minute * 60);
        let output = StdCommand::new("git")
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

    fn commit(&self, file: &str, message: &str, minute: u64) {
        std::fs::write(self.path().join(file), format!("{}\n", message)).unwrap();
        self.git(&["add", file]);
        self.git_at(&["commit", "-m", message], minute);
    }

    fn read(&self, file: &str) -> String {
        std::fs::read_to_string(self.path().join(file)).expect("output file missing")
    }

    /// The binary with global config isolated from the user's home.
    fn bin(&self) -> Command {
        let mut cmd = Command::cargo_bin("branchviz").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path())
            .env_remove("BRANCHVIZ_CONFIG");
        cmd
    }
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_writes_default_output_file() {
    let repo = TestRepo::new();
    commands::render(&repo.context(), &RenderArgs::default()).unwrap();

    let text = repo.read(DEFAULT_OUTPUT);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "gitGraph LR;");
    assert_eq!(lines[1], "  checkout main");
    assert_eq!(lines.iter().filter(|l| l.contains("commit id:")).count(), 3);
    assert_eq!(lines.iter().filter(|l| **l == "  branch feature").count(), 1);
    assert!(lines.last().unwrap().starts_with("  merge feature id:\""));
}

#[test]
fn render_honors_output_and_overrides() {
    let repo = TestRepo::new();
    let args = RenderArgs {
        output: Some("docs/graph.txt".into()),
        direction: Some(Direction::TopBottom),
        short_len: Some(10),
        ..Default::default()
    };
    commands::render(&repo.context(), &args).unwrap();

    let text = repo.read("docs/graph.txt");
    assert!(text.starts_with("gitGraph TB;"));
    let first_commit = text.lines().find(|l| l.contains("commit id:")).unwrap();
    // `  commit id:"` + 10 characters + `"`
    assert_eq!(first_commit.len(), "  commit id:\"\"".len() + 10);
}

#[test]
fn render_json_lists_directives() {
    let repo = TestRepo::new();
    let args = RenderArgs {
        output: Some("graph.json".into()),
        format: Format::Json,
        ..Default::default()
    };
    commands::render(&repo.context(), &args).unwrap();

    let value: serde_json::Value = serde_json::from_str(&repo.read("graph.json")).unwrap();
    assert_eq!(value["initial_line"], "main");
    assert_eq!(value["created_lines"], serde_json::json!(["feature"]));
    let kinds: Vec<&str> = value["directives"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["init", "commit", "create", "switch", "commit", "commit", "switch", "merge"]
    );
}

#[test]
fn render_uses_repo_config_output() {
    let repo = TestRepo::new();
    let config_dir = repo.path().join(".git/branchviz");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "output = \"from-config.txt\"\n").unwrap();

    commands::render(&repo.context(), &RenderArgs::default()).unwrap();

    assert!(repo.read("from-config.txt").starts_with("gitGraph"));
    assert!(!repo.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn render_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    if git2_discovers(dir.path()) {
        return;
    }
    let ctx = Context {
        cwd: Some(dir.path().to_path_buf()),
        quiet: true,
        ..Default::default()
    };
    let err = commands::render(&ctx, &RenderArgs::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to open repository"));
}

/// Whether `path` already sits inside some repository.
fn git2_discovers(path: &Path) -> bool {
    StdCommand::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(path)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_render_to_stdout() {
    let repo = TestRepo::new();
    repo.bin()
        .args(["render", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gitGraph LR;\n  checkout main\n"))
        .stdout(predicate::str::contains("  merge feature id:\""))
        .stderr(predicate::str::contains("Generating branch visualization"));

    assert!(!repo.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn binary_render_reports_saved_file() {
    let repo = TestRepo::new();
    repo.bin()
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagram saved to:"))
        .stdout(predicate::str::contains(DEFAULT_OUTPUT));
}

#[test]
fn binary_unwritable_output_falls_back_to_stdout() {
    let repo = TestRepo::new();
    // A directory cannot be opened as the output file.
    std::fs::create_dir(repo.path().join("blocked")).unwrap();

    repo.bin()
        .args(["render", "--output", "blocked"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--- Branch Visualization (Fallback) ---\ngitGraph LR;\n  checkout main\n",
        ))
        .stdout(predicate::str::contains(
            "--- End of Branch Visualization (Fallback) ---",
        ))
        .stdout(predicate::str::contains("Diagram saved to:").not())
        .stderr(predicate::str::contains("warning: failed to write"));

    assert!(repo.path().join("blocked").is_dir());
}

#[test]
fn binary_quiet_render_prints_nothing() {
    let repo = TestRepo::new();
    repo.bin()
        .args(["--quiet", "render"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(repo.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn binary_debug_logs_summary() {
    let repo = TestRepo::new();
    repo.bin()
        .args(["--debug", "render", "--stdout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[debug] repository: "))
        .stderr(predicate::str::contains("[debug] initial line: main"))
        .stderr(predicate::str::contains("1 merges, 0 ambiguous merges"));
}

#[test]
fn binary_rejects_invalid_config() {
    let repo = TestRepo::new();
    let config_dir = repo.path().join(".git/branchviz");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "remote_prefixes = [\"origin\"]\n").unwrap();

    repo.bin()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Failed to scan repository"));
}

#[test]
fn binary_config_lists_values() {
    let repo = TestRepo::new();
    repo.bin()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("direction = LR"))
        .stdout(predicate::str::contains("short_id_len = 7"))
        .stdout(predicate::str::contains("remote_prefixes = origin/"));
}

#[test]
fn binary_completion_bash() {
    Command::cargo_bin("branchviz")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("branchviz"));
}

#[test]
fn binary_version() {
    Command::cargo_bin("branchviz")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("branchviz"));
}
