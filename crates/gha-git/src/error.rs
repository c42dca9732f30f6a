//! Error types for gha-git

use std::path::PathBuf;

/// Result type for gha-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gha-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Not inside a git working tree: {path}")]
    NotARepository { path: PathBuf },

    #[error("Path {path} is outside the repository at {root}")]
    OutsideRepository { path: PathBuf, root: PathBuf },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("HEAD is detached; cannot determine the branch to push")]
    DetachedHead,
}
