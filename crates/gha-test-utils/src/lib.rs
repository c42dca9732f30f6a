//! Shared test utilities for the actions toolkit workspace.
//!
//! Dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`git`] - git repository fixtures at three realism levels
//! - [`repo`] - [`repo::TestRepo`] builder for action + README layouts

pub mod git;
pub mod repo;
