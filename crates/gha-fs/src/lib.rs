//! Filesystem helpers for the actions toolkit
//!
//! Provides forward-slash normalized paths and safe text I/O used by the
//! README updater and the telemetry exporter.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
