//! # Table Formatter
//!
//! Renders query results as fixed-width bordered tables.
//!
//! ## Layout
//! ```text
//! ----------------------------------------------------------------
//! |                    Hotels within 30 units                    |
//! ----------------------------------------------------------------
//! | Hotel ID | Hotel Name                     | Date Established |
//! ----------------------------------------------------------------
//! |        1 | Seaside Inn                    |       03/04/1999 |
//! ----------------------------------------------------------------
//! ```
//!
//! Every line has the same width: `sum(widths) + 3 * columns + 1`. Cells
//! wider than their column are cut so the borders never move.

use std::fmt::Write;

/// Anything that can be shown as one table row.
pub trait TableRow {
    /// Cell values in column order.
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Vec<String> {
    fn cells(&self) -> Vec<String> {
        self.clone()
    }
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column: header text, fixed width, alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl Column {
    /// Right-aligned column (ids, numbers, dates).
    pub fn right(header: impl Into<String>, width: usize) -> Self {
        Column {
            header: header.into(),
            width,
            align: Align::Right,
        }
    }

    /// Left-aligned column (names, URLs).
    pub fn left(header: impl Into<String>, width: usize) -> Self {
        Column {
            header: header.into(),
            width,
            align: Align::Left,
        }
    }
}

/// A titled table layout.
///
/// ## Example
/// ```rust
/// use hotel_core::table::{Column, TableSpec};
///
/// let spec = TableSpec::new("Rooms")
///     .column(Column::right("Room", 4))
///     .column(Column::left("URL", 6));
///
/// let out = spec.render(&[vec!["12".to_string(), "a.png".to_string()]]);
/// assert!(out.contains("|   12 | a.png  |"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub title: String,
    pub columns: Vec<Column>,
}

impl TableSpec {
    /// Creates an empty layout with a title.
    pub fn new(title: impl Into<String>) -> Self {
        TableSpec {
            title: title.into(),
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Total line width including borders.
    pub fn line_width(&self) -> usize {
        self.columns.iter().map(|c| c.width).sum::<usize>() + 3 * self.columns.len() + 1
    }

    /// Renders the table, or a single message row when `rows` is empty.
    pub fn render_or_empty<R: TableRow>(&self, rows: &[R], message: &str) -> String {
        if !rows.is_empty() {
            return self.render(rows);
        }

        let mut out = self.head();
        let _ = writeln!(out, "{}", self.spanning_line(message, Align::Left));
        out.push_str(&self.border());
        out.push('\n');
        out
    }

    /// Renders the table with all rows.
    pub fn render<R: TableRow>(&self, rows: &[R]) -> String {
        let mut out = self.head();
        for row in rows {
            let _ = writeln!(out, "{}", self.row_line(&row.cells()));
        }
        out.push_str(&self.border());
        out.push('\n');
        out
    }

    fn head(&self) -> String {
        let border = self.border();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut out = String::new();
        let _ = writeln!(out, "{}", border);
        let inner = self.line_width().saturating_sub(4);
        let _ = writeln!(out, "| {} |", center(&self.title, inner));
        let _ = writeln!(out, "{}", border);
        let _ = writeln!(out, "{}", self.header_line(&headers));
        let _ = writeln!(out, "{}", border);
        out
    }

    fn border(&self) -> String {
        "-".repeat(self.line_width())
    }

    fn spanning_line(&self, text: &str, align: Align) -> String {
        format!("| {} |", fit(text, self.line_width().saturating_sub(4), align))
    }

    fn header_line(&self, headers: &[String]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(headers)
            .map(|(col, text)| fit(text, col.width, col.align))
            .collect();
        format!("| {} |", cells.join(" | "))
    }

    fn row_line(&self, values: &[String]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let value = values.get(i).map(String::as_str).unwrap_or("");
                fit(value, col.width, col.align)
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    }
}

/// Pads or cuts `text` to exactly `width` characters.
fn fit(text: &str, width: usize, align: Align) -> String {
    let text: String = text.chars().take(width).collect();
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

/// Centers `text` in `width` characters (extra space goes right).
fn center(text: &str, width: usize) -> String {
    let text: String = text.chars().take(width).collect();
    format!("{:^width$}", text, width = width)
}
