//! Error types for gha-core

use std::path::PathBuf;

/// Result type for gha-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gha-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An action definition could not be parsed
    #[error("Failed to parse action definition at {path}: {message}")]
    ActionParse { path: PathBuf, message: String },

    /// An invocation input was rejected
    #[error("Invalid input '{name}': {message}")]
    InvalidInput { name: String, message: String },

    /// A README passed validation but its markers were gone by splice time
    #[error("README at {path} was validated but its markers could not be located when splicing")]
    StaleRead { path: PathBuf },

    /// Telemetry opt-out variables missing from the environment
    #[error("Telemetry variables not set: {}", names.join(", "))]
    TelemetryNotSet { names: Vec<String> },

    /// A background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from gha-fs
    #[error(transparent)]
    Fs(#[from] gha_fs::Error),

    /// Git error from gha-git
    #[error(transparent)]
    Git(#[from] gha_git::Error),

    /// Marker or splice error from gha-blocks
    #[error(transparent)]
    Blocks(#[from] gha_blocks::Error),
}

impl Error {
    pub fn invalid_input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            name: name.into(),
            message: message.into(),
        }
    }
}
