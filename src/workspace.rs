//! Destination directory lifecycle around a clone.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use color_print::cformat;

use crate::styling::{println, progress_message};

/// Derive the clone destination from the repository URL: the last path
/// segment with any `.git` suffix removed.
pub fn destination_from_url(url: &str) -> PathBuf {
    let tail = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url);
    PathBuf::from(tail.strip_suffix(".git").unwrap_or(tail))
}

/// Remove a leftover destination directory from a previous run, if any.
pub fn scrub_destination(path: &Path) -> Result<()> {
    if path.exists() {
        println!(
            "{}",
            progress_message(cformat!(
                "Removing existing directory <bold>{}</>",
                path.display()
            ))
        );
        std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Strip the `.git` directory so the destination is a plain file tree.
pub fn remove_git_dir(repo_path: &Path) -> Result<()> {
    let git_dir = repo_path.join(".git");
    if git_dir.exists() {
        std::fs::remove_dir_all(&git_dir)
            .with_context(|| format!("failed to remove {}", git_dir.display()))?;
    }
    Ok(())
}
