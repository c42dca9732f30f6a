//! Core layer of the actions toolkit
//!
//! Sits on the Layer 0 crates and provides:
//!
//! - **Action model**: the `inputs` section of `action.yml` files
//! - **README updater**: validity filter, per-record splicing and the
//!   concurrent batch driver over every tracked action
//! - **Publishing**: commit and push of regenerated READMEs, or a debug report
//! - **Telemetry**: `DO_NOT_TRACK` opt-out exports to the job environment
//!
//! ```text
//!                gha-cli
//!                   |
//!                gha-core
//!                   |
//!     +-------------+-------------+
//!     |             |             |
//!  gha-fs      gha-blocks      gha-git
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod publish;
pub mod readme;
pub mod telemetry;
pub mod updater;

pub use action::{ActionDefinition, ActionInput, INPUT_COLUMNS, InputRow, is_action_file};
pub use config::{
    DEFAULT_COMMIT_MESSAGE, DEFAULT_COMMITTER_EMAIL, DEFAULT_COMMITTER_NAME, DEFAULT_HEADING,
    DEFAULT_REMOTE, DEFAULT_TAG_NAME, GitProvider, RunConfig, parse_boolean_input,
};
pub use error::{Error, Result};
pub use gha_git::CommitIdentity;
pub use publish::{PathDiff, PublishOutcome, publish};
pub use readme::{CandidateRecord, README_FILE_NAME, RecordUpdate, update_record};
pub use telemetry::{
    EnvVar, ExportTarget, TELEMETRY_DEFAULTS, is_truthy, parse_additional, telemetry_exports,
};
pub use updater::{BatchReport, Preview, ReadmeUpdater, RecordFailure, RecordOutcome};
