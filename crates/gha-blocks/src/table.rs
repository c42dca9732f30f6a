//! Markdown table rendering.

use unicode_width::UnicodeWidthStr;

/// Narrowest column a rendered table will use.
const MIN_COLUMN_WIDTH: usize = 3;

/// Upper-cases the first character of `word`.
///
/// ```
/// use gha_blocks::capitalize;
///
/// assert_eq!(capitalize("description"), "Description");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders rows as an aligned, pipe-delimited markdown table.
///
/// The first row is the header and is followed by a dash separator. Every
/// column is padded to its widest cell. Short rows are padded with empty
/// cells. Cells are flattened to a single line and literal pipes are escaped
/// so that free-form descriptions cannot break the table.
///
/// ```
/// use gha_blocks::render_table;
///
/// let rows = vec![
///     vec!["Name".to_string(), "Required".to_string()],
///     vec!["token".to_string(), "true".to_string()],
/// ];
/// assert_eq!(
///     render_table(&rows),
///     "| Name  | Required |\n| ----- | -------- |\n| token | true     |"
/// );
/// ```
pub fn render_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
        .collect();

    let column_count = cells.iter().map(Vec::len).max().unwrap_or(header.len());
    let mut widths = vec![MIN_COLUMN_WIDTH; column_count];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(render_row(&cells[0], &widths));
    lines.push(render_separator(&widths));
    for row in &cells[1..] {
        lines.push(render_row(row, &widths));
    }

    lines.join("\n")
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (index, width) in widths.iter().enumerate() {
        let cell = row.get(index).map(String::as_str).unwrap_or("");
        let padding = width.saturating_sub(cell.width());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding));
        line.push_str(" |");
    }
    line
}

fn render_separator(widths: &[usize]) -> String {
    let mut line = String::from("|");
    for width in widths {
        line.push(' ');
        line.push_str(&"-".repeat(*width));
        line.push_str(" |");
    }
    line
}

fn escape_cell(cell: &str) -> String {
    cell.lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
