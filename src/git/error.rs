//! Typed errors for git and branch-resolution failures.
//!
//! `GitError` is a typed enum for domain errors that can be pattern-matched
//! and tested. Use `.into()` to convert to `anyhow::Error` while preserving
//! the type for downcasting. Display produces styled output for users.
//!
//! An absent target or origin branch is never an error — it is valid input
//! with a defined fallback. These variants cover the conditions where the
//! run must stop.

use color_print::cformat;

use crate::styling::{error_message, format_with_gutter, hint_message};

/// Fatal conditions surfaced to the user.
///
/// # Usage
///
/// ```ignore
/// // Return a typed error (Display produces styled output)
/// return Err(GitError::DefaultBranchNotProvided.into());
///
/// // Pattern match on errors
/// if let Some(GitError::MergeFailed { branch, .. }) = err.downcast_ref() {
///     println!("merge of {} failed", branch);
/// }
/// ```
#[derive(Debug, Clone)]
pub enum GitError {
    /// No default branch name was given (empty or missing).
    DefaultBranchNotProvided,
    /// A default branch was given but is not among the repository's remote branches.
    DefaultBranchNotFound {
        branch: String,
    },
    /// Neither a target nor an origin branch was supplied, so there is
    /// nothing to resolve.
    NoBranchGiven,
    /// `git clone` failed.
    CloneFailed {
        url: String,
        error: String,
    },
    /// `git merge` failed — conflicts or any other git-level merge error.
    /// Checkouts performed before the merge are not rolled back.
    MergeFailed {
        branch: String,
        into: String,
        error: String,
    },
}

impl std::error::Error for GitError {}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::DefaultBranchNotProvided => {
                write!(
                    f,
                    "{}\n{}",
                    error_message("No default branch provided"),
                    hint_message(cformat!(
                        "Pass one with <bright-black>--default-branch <<name>></>"
                    ))
                )
            }

            GitError::DefaultBranchNotFound { branch } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Default branch <bold>{branch}</> does not exist in the repository"
                    )),
                    hint_message("The default branch must be one of the remote branches")
                )
            }

            GitError::NoBranchGiven => {
                write!(
                    f,
                    "{}\n{}",
                    error_message("Neither a target nor an origin branch was provided"),
                    hint_message(cformat!(
                        "Pass <bright-black>--target-branch</> / <bright-black>--origin-branch</>, \
                         or set <bright-black>TRAVIS_BRANCH</> / <bright-black>TRAVIS_PULL_REQUEST_BRANCH</>"
                    ))
                )
            }

            GitError::CloneFailed { url, error } => {
                let header = error_message(cformat!("Failed to clone <bold>{url}</>"));
                write!(f, "{}", format_error_block(header, error))
            }

            GitError::MergeFailed {
                branch,
                into,
                error,
            } => {
                let header = error_message(cformat!(
                    "Failed to merge <bold>{branch}</> into <bold>{into}</>"
                ));
                write!(f, "{}", format_error_block(header, error))
            }
        }
    }
}

/// Format an error with header and gutter content
fn format_error_block(header: impl Into<String>, error: &str) -> String {
    let header = header.into();
    let trimmed = error.trim();
    if trimmed.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_with_gutter(trimmed))
    }
}
