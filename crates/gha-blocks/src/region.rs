//! Region location between a marker pair.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::markers::MarkerPair;

/// Line indices of the marker pair that delimits a generated region.
///
/// Both indices point at the marker lines themselves; the replaceable
/// content is the half-open range between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// 0-based index of the last start marker line.
    pub start_index: usize,
    /// 0-based index of the last end marker line.
    pub end_index: usize,
}

impl Region {
    /// Finds the last start marker and the last end marker in `lines`.
    ///
    /// When a document carries several copies of the marker pair the most
    /// recent (lowest in the file) occurrence wins. Ordering is not checked
    /// here; see [`Region::replace_range`].
    ///
    /// # Errors
    /// Returns `Error::MarkersNotFound` if either marker is missing.
    ///
    /// # Example
    /// ```
    /// use gha_blocks::{MarkerPair, Region};
    ///
    /// let markers = MarkerPair::from_tag("list").unwrap();
    /// let lines = ["<!-- LIST:START -->", "old", "<!-- LIST:END -->"];
    /// let region = Region::locate(&lines, &markers).unwrap();
    /// assert_eq!((region.start_index, region.end_index), (0, 2));
    /// ```
    pub fn locate<S: AsRef<str>>(lines: &[S], markers: &MarkerPair) -> Result<Self> {
        let start = lines.iter().rposition(|line| markers.is_start(line.as_ref()));
        let end = lines.iter().rposition(|line| markers.is_end(line.as_ref()));

        match (start, end) {
            (Some(start_index), Some(end_index)) => Ok(Self {
                start_index,
                end_index,
            }),
            _ => Err(Error::MarkersNotFound {
                start: markers.start().to_string(),
                end: markers.end().to_string(),
            }),
        }
    }

    /// The range of lines strictly between the markers.
    ///
    /// Returns `None` when the end marker precedes the start marker.
    pub fn replace_range(&self) -> Option<Range<usize>> {
        (self.start_index < self.end_index).then(|| self.start_index + 1..self.end_index)
    }

    /// Whether the markers are adjacent, leaving nothing between them.
    pub fn is_empty(&self) -> bool {
        self.replace_range().is_some_and(|range| range.is_empty())
    }
}
