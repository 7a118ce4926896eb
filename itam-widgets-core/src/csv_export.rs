//! Table to CSV conversion for the "Export CSV" buttons on listing pages.
//!
//! The browser layer reads the header and body cell texts into a
//! [`TableSnapshot`]; this module turns the snapshot into CSV text.
//!
//! # Format
//!
//! - Every field is quoted, embedded quotes are doubled
//! - Fields are separated by `,`, lines by `\n`, no trailing newline
//! - The "Actions" column (row buttons) is dropped from the header, and each
//!   body row is cut to the number of retained headers. Rows are aligned by
//!   position, so this assumes the Actions column is the last one.

use crate::error::Result;

/// Header text (compared trimmed and case-insensitively) of the column that
/// is never exported.
pub const EXCLUDED_HEADER: &str = "actions";

/// Global function name the listing templates call from their export buttons.
pub const EXPORT_GLOBAL: &str = "exportTableToCSV";

/// Cell texts read from a table at export time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSnapshot {
    /// Header cell texts in document order (`thead th`)
    pub headers: Vec<String>,
    /// Body rows (`tbody tr`), each a list of `td` texts
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Headers that survive the Actions filter.
    pub fn retained_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|h| !is_excluded_header(h))
            .collect()
    }

    /// Serialize the snapshot to CSV text.
    pub fn to_csv(&self) -> Result<String> {
        let headers = self.retained_headers();
        let width = headers.len();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(quote_record(&headers)?);

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .take(width)
                .map(|cell| clean_cell_text(cell))
                .collect();
            lines.push(quote_record(&cells)?);
        }

        Ok(lines.join("\n"))
    }
}

/// Whether a header names the row actions column.
pub fn is_excluded_header(text: &str) -> bool {
    text.trim().to_lowercase() == EXCLUDED_HEADER
}

/// Trim the cell text and replace every run of two or more whitespace
/// characters with a single space. A lone whitespace character is kept as is.
pub fn clean_cell_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out
}

/// Wrap CSV text in the `data:` URI used for the download link. The caller
/// is expected to run the result through `encodeURI`.
pub fn csv_data_uri(csv: &str) -> String {
    format!("data:text/csv;charset=utf-8,{}", csv)
}

/// Quote one record as a single CSV line without terminator.
fn quote_record<S: AsRef<str>>(fields: &[S]) -> Result<String> {
    if fields.is_empty() {
        return Ok(String::new());
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(fields.iter().map(|f| f.as_ref()))?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
