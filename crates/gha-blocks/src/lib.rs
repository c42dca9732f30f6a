//! Marker-delimited section updates for generated README content.
//!
//! A README opts in to generated content by carrying a pair of HTML comment
//! markers on their own lines:
//!
//! ```text
//! <!-- ACTION-INPUT-LIST:START -->
//! generated content
//! <!-- ACTION-INPUT-LIST:END -->
//! ```
//!
//! The lines strictly between the *last* start marker and the *last* end
//! marker are replaced by a freshly built [`ContentBlock`]. Everything outside
//! the markers is left untouched, and a document whose replacement is
//! byte-identical is reported as [`Splice::Unchanged`] so callers can skip the
//! write.
//!
//! ```
//! use gha_blocks::{ContentBlock, Heading, HeadingLevel, MarkerPair, Splice, splice};
//!
//! let markers = MarkerPair::from_tag("action input list").unwrap();
//! let readme = format!("# Action\n{}\n{}\n", markers.start(), markers.end());
//!
//! let heading = Heading::new("Inputs", HeadingLevel::parse("2"));
//! let block = ContentBlock::build(&heading, &["name"], &[vec!["token".to_string()]]);
//!
//! let Splice::Changed(updated) = splice(&readme, &markers, &block).unwrap() else {
//!     panic!("expected a change");
//! };
//! assert!(updated.contains("## Inputs"));
//! assert_eq!(splice(&updated, &markers, &block).unwrap(), Splice::Unchanged);
//! ```

pub mod content;
pub mod error;
pub mod markers;
pub mod region;
pub mod splice;
pub mod table;

pub use content::{ContentBlock, Heading, HeadingLevel};
pub use error::{Error, Result};
pub use markers::MarkerPair;
pub use region::Region;
pub use splice::{Splice, splice, splice_lines};
pub use table::{capitalize, render_table};
