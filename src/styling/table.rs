//! Column-aligned tables for primary output.

use anstyle::Style;
use unicode_width::UnicodeWidthStr;

use super::{CELL, HEADER};

/// A table whose columns are aligned by display width.
///
/// Headers render with [`HEADER`], cells with [`CELL`] unless a column style
/// is set. The last column is never padded.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    styles: Vec<Style>,
    rows: Vec<Vec<String>>,
}

/// Spaces between columns
const COLUMN_GAP: usize = 2;

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let styles = vec![CELL; headers.len()];
        Self {
            headers,
            styles,
            rows: Vec::new(),
        }
    }

    /// Override the style of one column's cells.
    pub fn column_style(mut self, column: usize, style: Style) -> Self {
        if let Some(slot) = self.styles.get_mut(column) {
            *slot = style;
        }
        self
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table with ANSI styles, one line per row, header first.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_line(&self.headers, &widths, |_| HEADER));
        for row in &self.rows {
            lines.push(render_line(row, &widths, |i| self.styles[i]));
        }
        lines.join("\n")
    }
}

fn render_line(cells: &[String], widths: &[usize], style_for: impl Fn(usize) -> Style) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let style = style_for(i);
        line.push_str(&format!("{style}{cell}{style:#}"));
        if i < last {
            let pad = widths[i].saturating_sub(cell.width()) + COLUMN_GAP;
            line.push_str(&" ".repeat(pad));
        }
    }
    line
}
