//! Error types for gha-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid comment tag name {tag:?}: must contain at least one non-whitespace character")]
    InvalidTagName { tag: String },

    #[error("Markers not found: expected both {start} and {end} on their own lines")]
    MarkersNotFound { start: String, end: String },

    #[error("End marker on line {end_line} precedes start marker on line {start_line}")]
    InvertedMarkers { start_line: usize, end_line: usize },
}
