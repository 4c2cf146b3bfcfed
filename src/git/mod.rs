//! Git operations over the cloned working copy.

mod error;
mod repository;

pub use error::GitError;
pub use repository::Repository;
