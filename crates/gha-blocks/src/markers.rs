//! Marker pair construction.
//!
//! Markers are derived from a user supplied tag name:
//! ```text
//! <!-- TAG-NAME:START -->
//! <!-- TAG-NAME:END -->
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Runs of whitespace inside a tag name collapse to a single hyphen.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// The start and end comment lines delimiting a generated region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl MarkerPair {
    /// Builds the marker pair for a tag name.
    ///
    /// The tag is trimmed, inner whitespace runs become `-` and the result is
    /// upper-cased, so `"test tag"`, `"TEST TAG"` and `"TEST-TAG"` all yield
    /// the same pair.
    ///
    /// # Errors
    /// Returns `Error::InvalidTagName` when nothing is left after
    /// normalization.
    ///
    /// # Example
    /// ```
    /// use gha_blocks::MarkerPair;
    ///
    /// let markers = MarkerPair::from_tag("test tag").unwrap();
    /// assert_eq!(markers.start(), "<!-- TEST-TAG:START -->");
    /// assert_eq!(markers.end(), "<!-- TEST-TAG:END -->");
    /// ```
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return Err(Error::InvalidTagName {
                tag: tag.to_string(),
            });
        }

        Ok(Self {
            start: format!("<!-- {normalized}:START -->"),
            end: format!("<!-- {normalized}:END -->"),
        })
    }

    /// The opening comment line.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The closing comment line.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Whether `line` is the start marker, ignoring surrounding whitespace.
    pub fn is_start(&self, line: &str) -> bool {
        line.trim() == self.start
    }

    /// Whether `line` is the end marker, ignoring surrounding whitespace.
    pub fn is_end(&self, line: &str) -> bool {
        line.trim() == self.end
    }

    /// Whether both markers appear as whole lines in `lines`.
    pub fn is_contained_in<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        let has_start = lines.iter().any(|line| self.is_start(line.as_ref()));
        has_start && lines.iter().any(|line| self.is_end(line.as_ref()))
    }

    /// Both markers as an array, start first.
    pub fn as_array(&self) -> [&str; 2] {
        [&self.start, &self.end]
    }
}

fn normalize_tag(tag: &str) -> String {
    WHITESPACE_RUN
        .replace_all(tag.trim(), "-")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_runs() {
        assert_eq!(normalize_tag("a \t b"), "A-B");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_tag("  tag  "), "TAG");
    }

    #[test]
    fn test_blank_tag_rejected() {
        assert!(matches!(
            MarkerPair::from_tag("   "),
            Err(Error::InvalidTagName { .. })
        ));
    }

    #[test]
    fn test_markers_match_with_indentation() {
        let markers = MarkerPair::from_tag("list").unwrap();
        assert!(markers.is_start("   <!-- LIST:START -->\t"));
        assert!(markers.is_end("<!-- LIST:END -->"));
        assert!(!markers.is_start("text <!-- LIST:START -->"));
    }
}
