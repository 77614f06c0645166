//! Preview table for the first rows of a loaded file.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::theme::theme;

/// Widest a column is drawn, in characters.
const MAX_COLUMN_WIDTH: usize = 24;

/// The rendered preview: headers plus a bounded set of body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Data rows in the whole file, shown in the caption.
    total_rows: usize,
}

impl PreviewTable {
    /// Create an empty preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the given headers and the rows to show.
    ///
    /// `total_rows` counts the data rows of the whole file for the caption.
    pub fn set_contents(&mut self, headers: &[String], rows: &[Vec<String>], total_rows: usize) {
        self.headers = headers.to_vec();
        self.rows = rows.to_vec();
        self.total_rows = total_rows.max(rows.len());
    }

    /// Get the header cells.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the body rows being shown.
    pub fn body_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the number of data rows in the source file.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Caption describing how much of the file is shown.
    pub fn caption(&self) -> String {
        if self.rows.len() < self.total_rows {
            format!(
                " Preview: first {} of {} rows ",
                self.rows.len(),
                self.total_rows
            )
        } else {
            format!(" Preview: {} rows ", self.total_rows)
        }
    }

    fn column_widths(&self) -> Vec<Constraint> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                let widest = std::iter::once(&self.headers)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                Constraint::Length(widest.clamp(1, MAX_COLUMN_WIDTH) as u16)
            })
            .collect()
    }

    /// Render the table.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .title(Span::styled(self.caption(), Style::default().fg(t.fg)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));

        if self.headers.is_empty() {
            let paragraph = Paragraph::new("No data")
                .style(Style::default().fg(t.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(self.headers.iter().map(|h| Cell::from(h.as_str()))).style(
            Style::default()
                .fg(t.header)
                .add_modifier(Modifier::BOLD),
        );

        let rows = self
            .body_rows()
            .iter()
            .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));

        let table = Table::new(rows, self.column_widths())
            .header(header)
            .column_spacing(2)
            .style(Style::default().fg(t.fg))
            .block(block);

        frame.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rows(count: usize) -> Vec<Vec<String>> {
        (0..count)
            .map(|i| vec![i.to_string(), (i * 2).to_string()])
            .collect()
    }

    #[test]
    fn test_shown_rows_and_total() {
        let mut table = PreviewTable::new();
        table.set_contents(&headers(&["lat", "lon"]), &rows(10), 15);
        assert_eq!(table.body_rows().len(), 10);
        assert_eq!(table.total_rows(), 15);
        assert_eq!(table.body_rows()[9][0], "9");
    }

    #[test]
    fn test_total_never_below_shown() {
        let mut table = PreviewTable::new();
        table.set_contents(&headers(&["lat", "lon"]), &rows(4), 0);
        assert_eq!(table.total_rows(), 4);
        assert_eq!(table.caption(), " Preview: 4 rows ");
    }

    #[test]
    fn test_header_only() {
        let mut table = PreviewTable::new();
        table.set_contents(&headers(&["lat", "lon"]), &[], 0);
        assert_eq!(table.headers().len(), 2);
        assert!(table.body_rows().is_empty());
        assert_eq!(table.caption(), " Preview: 0 rows ");
    }

    #[test]
    fn test_set_contents_replaces() {
        let mut table = PreviewTable::new();
        table.set_contents(&headers(&["a", "b", "c"]), &rows(5), 5);
        table.set_contents(&headers(&["x"]), &rows(2), 2);
        assert_eq!(table.headers(), &["x".to_string()]);
        assert_eq!(table.body_rows().len(), 2);
    }

    #[test]
    fn test_caption_mentions_truncation() {
        let mut table = PreviewTable::new();
        table.set_contents(&headers(&["a", "b"]), &rows(10), 12);
        assert_eq!(table.caption(), " Preview: first 10 of 12 rows ");
    }

    #[test]
    fn test_column_widths_cover_ragged_rows() {
        let mut table = PreviewTable::new();
        let ragged = vec![vec!["1".to_string(), "2".to_string(), "extra".to_string()]];
        table.set_contents(&headers(&["latitude", "lon"]), &ragged, 1);

        let widths = table.column_widths();
        assert_eq!(widths.len(), 3);
        assert_eq!(widths[0], Constraint::Length(8));
        assert_eq!(widths[2], Constraint::Length(5));
    }
}
