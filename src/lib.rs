//! Prepare a fresh clone for a CI build.
//!
//! Branchprep clones a repository and leaves its working tree on the right
//! branch for the build: for push builds the pushed branch (or the default),
//! for pull-request builds the origin branch merged into the target. The
//! policy itself lives in [`resolve`]; [`git`] shells out to the `git`
//! binary.
//!
//! The library API exists for the `bp` binary and for tests; it is not
//! stable.

pub mod config;
pub mod git;
pub mod resolve;
pub mod styling;
pub mod workspace;

pub use resolve::{BuildMode, Outcome, WorkingCopy};
