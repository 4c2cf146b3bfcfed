//! Branch resolution policy.
//!
//! Given a target branch, an origin branch, and a default branch, decide what
//! to check out — and, for pull-request builds, what to merge — against a
//! working copy. The step order in [`merge_for_pull_request`] is the contract
//! of this module and must not be reordered.

use anyhow::Result;
use color_print::cformat;

use crate::git::GitError;
use crate::styling::{println, progress_message, success_message};

/// Capability surface the policy needs from a cloned working copy.
///
/// [`crate::git::Repository`] implements this against the `git` binary;
/// tests drive the policy with an in-memory fake.
pub trait WorkingCopy {
    /// Remote branch names known to the repository.
    fn branches(&self) -> Result<Vec<String>>;
    /// Tag names known to the repository.
    fn tags(&self) -> Result<Vec<String>>;
    /// Switch the active branch to `name`.
    fn checkout(&self, name: &str) -> Result<()>;
    /// Detach at `tags/<name>`. Tags are resolved in their own namespace,
    /// never conflated with branches.
    fn checkout_tag(&self, name: &str) -> Result<()>;
    /// Merge `branch` into the currently active branch.
    fn merge(&self, branch: &str) -> Result<()>;
}

/// What kind of build triggered this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Direct push; no origin branch semantics apply.
    Push,
    /// Pull request; origin is merged toward target.
    PullRequest,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Push => write!(f, "PUSH"),
            BuildMode::PullRequest => write!(f, "PR"),
        }
    }
}

/// How a resolution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// PUSH build: `branch` is checked out (the target, or the default when
    /// the target was absent or unknown).
    CheckedOut { branch: String },
    /// PR build: `origin` was merged into `into` (target or default).
    Merged { origin: String, into: String },
    /// PR build: origin did not exist, so no merge; `active` is whatever
    /// checkout left in place.
    NoMerge { active: String },
}

/// Validate the default branch before any checkout happens.
///
/// The active branch is untouched when this fails.
pub fn validate_default_branch(repo: &dyn WorkingCopy, default: &str) -> Result<()> {
    if default.is_empty() {
        return Err(GitError::DefaultBranchNotProvided.into());
    }
    if !repo.branches()?.iter().any(|b| b == default) {
        return Err(GitError::DefaultBranchNotFound {
            branch: default.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validate the default branch, then run the mode's procedure.
pub fn resolve(
    repo: &dyn WorkingCopy,
    mode: BuildMode,
    target: Option<&str>,
    origin: Option<&str>,
    default: &str,
) -> Result<Outcome> {
    validate_default_branch(repo, default)?;
    match mode {
        BuildMode::Push => checkout_for_push(repo, target, default),
        BuildMode::PullRequest => merge_for_pull_request(repo, target, origin, default),
    }
}

/// PUSH build: checkout `target` if it exists (as branch or tag), else the
/// pre-validated `default`.
pub fn checkout_for_push(
    repo: &dyn WorkingCopy,
    target: Option<&str>,
    default: &str,
) -> Result<Outcome> {
    let branch = match checkout_if_present(repo, target)? {
        Some(name) => name,
        None => {
            checkout_branch(repo, default)?;
            default.to_string()
        }
    };
    Ok(Outcome::CheckedOut { branch })
}

/// PR build. Fixed step order:
///
/// 1. probe-checkout `origin`, recording whether it exists;
/// 2. probe-checkout `target`;
/// 3. if the target was missing, checkout `default`;
/// 4. if the origin exists, merge it into the active branch — a merge
///    failure propagates, checkouts are not rolled back;
/// 5. otherwise finish without merging.
///
/// Checking out the origin first is only an existence probe (checkout
/// doubles as the existence test, and materializes a local branch the later
/// merge can name); the active branch afterwards is always the target or the
/// default, never the origin.
pub fn merge_for_pull_request(
    repo: &dyn WorkingCopy,
    target: Option<&str>,
    origin: Option<&str>,
    default: &str,
) -> Result<Outcome> {
    let origin_found = checkout_if_present(repo, origin)?;
    let target_found = checkout_if_present(repo, target)?;

    let active = match target_found {
        Some(name) => name,
        None => {
            checkout_branch(repo, default)?;
            default.to_string()
        }
    };

    match origin_found {
        Some(origin) => {
            println!(
                "{}",
                progress_message(cformat!("Merging <bold>{origin}</> into <bold>{active}</>"))
            );
            repo.merge(&origin)?;
            println!("{}", success_message("Merge complete"));
            Ok(Outcome::Merged {
                origin,
                into: active,
            })
        }
        None => {
            if let Some(name) = origin {
                println!(
                    "{}",
                    progress_message(cformat!(
                        "Origin branch <bold>{name}</> does not exist, nothing to merge"
                    ))
                );
            }
            Ok(Outcome::NoMerge { active })
        }
    }
}

/// Probe-checkout: if `name` matches a remote branch, check it out; if it
/// matches a tag, check out `tags/<name>`. Returns the checked-out name, or
/// `None` when the name is absent or unknown.
fn checkout_if_present(repo: &dyn WorkingCopy, name: Option<&str>) -> Result<Option<String>> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if repo.branches()?.iter().any(|b| b == name) {
        checkout_branch(repo, name)?;
        Ok(Some(name.to_string()))
    } else if repo.tags()?.iter().any(|t| t == name) {
        repo.checkout_tag(name)?;
        println!(
            "{}",
            success_message(cformat!("Checked out <bold>tags/{name}</>"))
        );
        Ok(Some(name.to_string()))
    } else {
        Ok(None)
    }
}

fn checkout_branch(repo: &dyn WorkingCopy, name: &str) -> Result<()> {
    repo.checkout(name)?;
    println!(
        "{}",
        success_message(cformat!("Checked out <bold>{name}</>"))
    );
    Ok(())
}
