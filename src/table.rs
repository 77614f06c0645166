//! Naive CSV parsing into headers and rows.
//!
//! Text is split on newlines and each line on commas. Quoted fields,
//! escaped commas and embedded newlines are not supported.

/// A parsed CSV file: one header row followed by raw data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column headers, trimmed.
    pub headers: Vec<String>,
    /// Data rows, fields kept exactly as they appear in the file.
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Get the number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether any row has a different field count than the header.
    pub fn has_ragged_rows(&self) -> bool {
        self.rows.iter().any(|row| row.len() != self.headers.len())
    }

    /// Get at most `limit` rows from the start of the table.
    pub fn preview(&self, limit: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(limit)]
    }
}

/// Parse CSV text into a [`ParsedTable`].
///
/// The first line becomes the headers (each trimmed); every following
/// line becomes a row of untrimmed fields. A trailing `\r` is removed from
/// each line and the empty line left by a final newline is dropped.
pub fn parse_csv(text: &str) -> ParsedTable {
    if text.is_empty() {
        return ParsedTable::default();
    }

    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let mut lines = lines.into_iter().map(split_fields);

    let headers = lines
        .next()
        .map(|fields| fields.into_iter().map(|h| h.trim().to_string()).collect())
        .unwrap_or_default();
    let rows = lines.collect();

    ParsedTable { headers, rows }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}
