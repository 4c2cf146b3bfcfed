// Not every helper is used by every test binary that includes this module.
#![allow(dead_code)]

//! Test fixtures for branchprep.
//!
//! `TestRepo` builds a real git repository in a temporary directory to clone
//! from. Git commands run with an isolated environment (no global or system
//! config, deterministic timestamps) so tests do not depend on the host.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// The default branch every fixture repository is initialized with.
pub const DEFAULT_BRANCH: &str = "development";

/// Null device path, platform-appropriate.
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Configure a git command with an isolated environment:
/// no global or system config, deterministic timestamps, C locale,
/// no terminal prompts.
pub fn configure_git_cmd(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", NULL_DEVICE);
    cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
    cmd.env("GIT_AUTHOR_NAME", "Test Author");
    cmd.env("GIT_AUTHOR_EMAIL", "author@test.invalid");
    cmd.env("GIT_COMMITTER_NAME", "Test Committer");
    cmd.env("GIT_COMMITTER_EMAIL", "committer@test.invalid");
    cmd.env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z");
    cmd.env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
}

fn check_git_status(output: &Output, command: &str) {
    if !output.status.success() {
        panic!(
            "git {} failed:\nstdout: {}\nstderr: {}",
            command,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// A throwaway upstream repository to clone from.
///
/// Initialized on [`DEFAULT_BRANCH`] with one commit. Dropped with its
/// temporary directory.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = dunce::canonicalize(temp_dir.path())
            .expect("failed to canonicalize temp dir")
            .join("upstream");
        std::fs::create_dir(&path).expect("failed to create repo dir");

        let repo = Self {
            _temp_dir: temp_dir,
            path,
        };
        repo.run_git(&["init", "-b", DEFAULT_BRANCH]);
        repo.commit_file("README.md", "upstream\n", "initial commit");
        repo
    }

    /// Path of the upstream repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A `file://`-style URL for cloning. Plain paths work with git and keep
    /// the output stable across platforms.
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Run a git command in the repository, panicking on failure.
    pub fn run_git(&self, args: &[&str]) {
        self.run_git_in(&self.path, args);
    }

    /// Run a git command in a specific directory, panicking on failure.
    pub fn run_git_in(&self, dir: &Path, args: &[&str]) {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        configure_git_cmd(&mut cmd);
        let output = cmd.args(args).output().expect("failed to spawn git");
        check_git_status(&output, &args.join(" "));
    }

    /// Write `content` to `file`, stage it, and commit.
    pub fn commit_file(&self, file: &str, content: &str, message: &str) {
        std::fs::write(self.path.join(file), content).expect("failed to write file");
        self.run_git(&["add", file]);
        self.run_git(&["commit", "-m", message]);
    }

    /// Create `branch` off the current HEAD with one commit adding `file`,
    /// then return to the default branch.
    pub fn add_branch(&self, branch: &str, file: &str, content: &str) {
        self.run_git(&["checkout", "-b", branch]);
        self.commit_file(file, content, &format!("add {file}"));
        self.run_git(&["checkout", DEFAULT_BRANCH]);
    }

    /// Create two branches that both edit `conflict.txt`, so merging one
    /// into the other conflicts.
    pub fn add_conflicting_branches(&self, first: &str, second: &str) {
        self.commit_file("conflict.txt", "base\n", "add conflict file");
        self.run_git(&["checkout", "-b", first]);
        self.commit_file("conflict.txt", "first version\n", "edit on first");
        self.run_git(&["checkout", DEFAULT_BRANCH]);
        self.run_git(&["checkout", "-b", second]);
        self.commit_file("conflict.txt", "second version\n", "edit on second");
        self.run_git(&["checkout", DEFAULT_BRANCH]);
    }

    /// Tag the current HEAD.
    pub fn add_tag(&self, name: &str) {
        self.run_git(&["tag", name]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
