//! Column-aligned tables.

use super::theme::CampTheme;

/// How a row is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    #[default]
    Normal,
    /// Rendered in the success color.
    Good,
    /// Rendered in the error color.
    Bad,
}

/// A borderless table with an underlined heading row.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<(Vec<String>, RowStyle)>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| h.chars().count()).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row. Cells past the header count are dropped.
    pub fn add_row(&mut self, cells: &[&str], style: RowStyle) {
        let cells: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|s| s.to_string())
            .collect();

        for (width, cell) in self.column_widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }

        self.rows.push((cells, style));
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with `theme`, one line per row, no trailing newline.
    pub fn render(&self, theme: &CampTheme) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(format!(
            "{}",
            theme.highlight.apply_to(self.pad_row(&self.headers))
        ));
        let rule: Vec<String> = self.column_widths.iter().map(|w| "─".repeat(*w)).collect();
        lines.push(format!("{}", theme.dim.apply_to(rule.join("  "))));

        for (cells, style) in &self.rows {
            let text = self.pad_row(cells);
            let line = match style {
                RowStyle::Normal => text,
                RowStyle::Good => format!("{}", theme.success.apply_to(text)),
                RowStyle::Bad => format!("{}", theme.error.apply_to(text)),
            };
            lines.push(line);
        }

        lines.join("\n")
    }

    fn pad_row(&self, cells: &[String]) -> String {
        let last = self.column_widths.len().saturating_sub(1);
        let mut out = String::new();
        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:width$}  ", cell, width = width));
            }
        }
        out
    }
}
