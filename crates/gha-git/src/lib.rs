//! Git operations for the actions toolkit
//!
//! Thin git2 wrappers for the steps around README generation: locating the
//! repository root, listing tracked files, committing the regenerated files
//! and pushing them back.

pub mod commits;
pub mod error;
pub mod repo;

pub use commits::{CommitIdentity, commit_paths, push_current_branch};
pub use error::{Error, Result};
pub use repo::{
    StatusEntry, diff_path, discover_root, list_tracked_files, open, relative_path, status,
};
