//! Repository handle over a cloned working copy.
//!
//! All operations shell out to the `git` binary. Commands and their output
//! are logged at debug level (`-v`).

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

use super::GitError;
use crate::resolve::WorkingCopy;

/// A cloned working copy, addressed by its directory.
///
/// Created by [`Repository::clone_from`] (or [`Repository::at`] for an
/// existing clone), consumed by one resolution call, and torn down by the
/// caller afterwards.
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Open an existing working copy at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Clone `url` into `path` and return a handle to the new working copy.
    ///
    /// The destination must not exist; callers scrub stale directories first
    /// (see [`crate::workspace::scrub_destination`]).
    pub fn clone_from(url: &str, path: &Path) -> anyhow::Result<Self> {
        let mut cmd = Command::new("git");
        cmd.arg("clone").arg(url).arg(path);
        log::debug!("$ git clone {url} {}", path.display());

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute: git clone {url}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CloneFailed {
                url: url.to_string(),
                // Git uses \r for progress updates; normalize for stable output
                error: stderr.replace('\r', "\n").trim().to_string(),
            }
            .into());
        }

        // Canonicalize without Windows verbatim prefixes, which git rejects
        let path = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(Self::at(path))
    }

    /// The working copy's directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set a local committer identity so merge commits can be created in
    /// environments without a global git config (fresh CI workers).
    pub fn set_committer_identity(&self, name: &str, email: &str) -> anyhow::Result<()> {
        self.run_command(&["config", "user.name", name])?;
        self.run_command(&["config", "user.email", email])?;
        Ok(())
    }

    /// The currently checked-out branch, or `None` when HEAD is detached
    /// (e.g. after a tag checkout).
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let stdout = self.run_command(&["branch", "--show-current"])?;
        let branch = stdout.trim();
        Ok(if branch.is_empty() {
            None
        } else {
            Some(branch.to_string())
        })
    }

    /// Remote branch names known to the clone, without the remote prefix
    /// (`origin/feature` → `feature`). The `HEAD` symref is filtered out.
    pub fn remote_branches(&self) -> anyhow::Result<Vec<String>> {
        let output = self.run_command(&[
            "for-each-ref",
            "--format=%(refname:strip=3)",
            "refs/remotes/origin",
        ])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != "HEAD")
            .map(String::from)
            .collect())
    }

    /// Tag names known to the clone.
    pub fn tag_names(&self) -> anyhow::Result<Vec<String>> {
        let output = self.run_command(&["tag", "--list"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }

    /// Run a git command in the working copy and return its stdout.
    ///
    /// On failure the combined stderr/stdout is returned as the error message
    /// (some git commands print errors to stdout).
    fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);
        log::debug!("$ git {}", args.join(" "));

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.replace('\r', "\n");
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{}", error_msg);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.is_empty() {
            for line in stdout.trim().lines() {
                log::debug!("  {}", line);
            }
        }
        Ok(stdout)
    }
}

impl WorkingCopy for Repository {
    fn branches(&self) -> anyhow::Result<Vec<String>> {
        self.remote_branches()
    }

    fn tags(&self) -> anyhow::Result<Vec<String>> {
        self.tag_names()
    }

    fn checkout(&self, name: &str) -> anyhow::Result<()> {
        self.run_command(&["checkout", name])?;
        Ok(())
    }

    fn checkout_tag(&self, name: &str) -> anyhow::Result<()> {
        // Tags live in their own namespace; `tags/<name>` keeps a branch of
        // the same name from shadowing the tag.
        self.run_command(&["checkout", &format!("tags/{name}")])?;
        Ok(())
    }

    fn merge(&self, branch: &str) -> anyhow::Result<()> {
        let into = self
            .current_branch()?
            .unwrap_or_else(|| "HEAD".to_string());
        match self.run_command(&["merge", branch]) {
            Ok(_) => Ok(()),
            Err(err) => Err(GitError::MergeFailed {
                branch: branch.to_string(),
                into,
                error: err.to_string(),
            }
            .into()),
        }
    }
}
