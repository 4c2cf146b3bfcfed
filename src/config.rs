//! Resolve branch names and build mode from flags and CI environment.
//!
//! Flags always win; Travis-style environment variables fill the gaps.

use crate::resolve::BuildMode;

/// Default branch used when neither flag nor environment provides one.
pub const FALLBACK_DEFAULT_BRANCH: &str = "development";

/// Travis-style environment snapshot. Empty variables are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct CiEnv {
    /// `TRAVIS_BRANCH`: push branch, or PR target branch.
    pub branch: Option<String>,
    /// `TRAVIS_PULL_REQUEST_BRANCH`: PR origin branch.
    pub pull_request_branch: Option<String>,
    /// `TRAVIS_PULL_REQUEST`: `"false"` for push builds, a PR number otherwise.
    pub pull_request: Option<String>,
}

impl CiEnv {
    pub fn from_env() -> Self {
        Self {
            branch: non_empty_var("TRAVIS_BRANCH"),
            pull_request_branch: non_empty_var("TRAVIS_PULL_REQUEST_BRANCH"),
            pull_request: non_empty_var("TRAVIS_PULL_REQUEST"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Command-line overrides, all optional.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub origin: Option<String>,
    pub default: Option<String>,
    pub mode: Option<BuildMode>,
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub target: Option<String>,
    pub origin: Option<String>,
    pub default: String,
}

impl BuildConfig {
    /// Combine overrides with the environment. Each field falls back
    /// independently.
    pub fn resolve(overrides: Overrides, env: &CiEnv) -> Self {
        let mode = overrides.mode.unwrap_or(match env.pull_request.as_deref() {
            Some("false") => BuildMode::Push,
            _ => BuildMode::PullRequest,
        });
        Self {
            mode,
            target: overrides.target.or_else(|| env.branch.clone()),
            origin: overrides.origin.or_else(|| env.pull_request_branch.clone()),
            default: overrides
                .default
                .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()),
        }
    }
}
