//! Content block builder.
//!
//! The generated region always has the same four-entry shape:
//! a blank line, the heading, the rendered table and another blank line.

use crate::table::{capitalize, render_table};

/// A markdown heading depth between 1 and 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;
    pub const DEFAULT: u8 = 3;

    /// Clamps any integer into the valid heading range.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parses a user supplied level.
    ///
    /// Numbers are clamped into `1..=6`; anything that is not an integer
    /// falls back to level 3. Parsing never fails.
    ///
    /// ```
    /// use gha_blocks::HeadingLevel;
    ///
    /// assert_eq!(HeadingLevel::parse("7").get(), 6);
    /// assert_eq!(HeadingLevel::parse("-1").get(), 1);
    /// assert_eq!(HeadingLevel::parse("something else").get(), 3);
    /// ```
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(level) => Self::clamped(level),
            Err(_) => Self::default(),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The `#` prefix for this level.
    pub fn prefix(self) -> String {
        "#".repeat(self.0 as usize)
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heading text plus its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
    pub level: HeadingLevel,
}

impl Heading {
    pub fn new(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// Renders the heading line, e.g. `### Inputs`.
    pub fn render(&self) -> String {
        format!("{} {}", self.level.prefix(), self.text)
    }
}

/// The lines spliced between a marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    lines: Vec<String>,
}

impl ContentBlock {
    /// Builds `["", heading, table, ""]`.
    ///
    /// `columns` are the lower-case column names; they are capitalized to form
    /// the table header. `rows` hold one display string per column. The block
    /// has four entries even when `rows` is empty, in which case the table is
    /// just the header and its separator.
    pub fn build<S: AsRef<str>>(heading: &Heading, columns: &[S], rows: &[Vec<String>]) -> Self {
        let header: Vec<String> = columns.iter().map(|c| capitalize(c.as_ref())).collect();

        let mut table_rows = Vec::with_capacity(rows.len() + 1);
        table_rows.push(header);
        table_rows.extend(rows.iter().cloned());

        Self {
            lines: vec![
                String::new(),
                heading.render(),
                render_table(&table_rows),
                String::new(),
            ],
        }
    }

    /// The block entries. The table entry spans several physical lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
