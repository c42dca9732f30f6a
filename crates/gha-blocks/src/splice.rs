//! Splicing a content block into a document.

use crate::content::ContentBlock;
use crate::error::{Error, Result};
use crate::markers::MarkerPair;
use crate::region::Region;

/// Outcome of splicing a block into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    /// The regenerated document is byte-identical to the input.
    Unchanged,
    /// The regenerated document differs and should be written back.
    Changed(String),
}

/// Replaces the lines between the last marker pair with `block`.
///
/// The document is split on `\n` and re-joined with `\n`, so text outside the
/// region (including `\r` and trailing whitespace) is preserved exactly.
///
/// # Errors
/// - `Error::MarkersNotFound` if either marker line is missing
/// - `Error::InvertedMarkers` if the last end marker precedes the last start marker
pub fn splice(document: &str, markers: &MarkerPair, block: &ContentBlock) -> Result<Splice> {
    let lines: Vec<&str> = document.split('\n').collect();
    let updated = splice_lines(&lines, markers, block)?.join("\n");

    if updated == document {
        tracing::debug!(start = markers.start(), "Generated region already up to date");
        Ok(Splice::Unchanged)
    } else {
        Ok(Splice::Changed(updated))
    }
}

/// Line-level splice: returns the full new line sequence.
pub fn splice_lines<S: AsRef<str>>(
    lines: &[S],
    markers: &MarkerPair,
    block: &ContentBlock,
) -> Result<Vec<String>> {
    let region = Region::locate(lines, markers)?;
    let range = region.replace_range().ok_or(Error::InvertedMarkers {
        start_line: region.start_index + 1,
        end_line: region.end_index + 1,
    })?;

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + block.len());
    out.extend(lines[..range.start].iter().map(|l| l.as_ref().to_string()));
    out.extend(block.lines().iter().cloned());
    out.extend(lines[range.end..].iter().map(|l| l.as_ref().to_string()));

    Ok(out)
}
