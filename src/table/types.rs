//! Table types

/// One output row: ordered string cells
pub type Row = Vec<String>;

/// Header row(s) followed by data rows
///
/// A table is built from one or more sections. Each section is a header row
/// followed by its data rows, and every data row is exactly as wide as its
/// section's header. Sections are concatenated positionally, never merged by
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    /// Index of each section's header row in `rows`
    header_rows: Vec<usize>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a complete section
    pub(crate) fn push_section(&mut self, header: Row, data: Vec<Row>) {
        debug_assert!(data.iter().all(|row| row.len() == header.len()));
        self.header_rows.push(self.rows.len());
        self.rows.push(header);
        self.rows.extend(data);
    }

    /// All rows, headers included, in output order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume the table into its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Total number of rows, headers included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of sections (header rows)
    pub fn section_count(&self) -> usize {
        self.header_rows.len()
    }

    /// Check if the row at `index` is a header
    pub fn is_header(&self, index: usize) -> bool {
        self.header_rows.binary_search(&index).is_ok()
    }

    /// Header rows in order
    pub fn headers(&self) -> impl Iterator<Item = &Row> {
        self.header_rows.iter().map(|&i| &self.rows[i])
    }

    /// First header row, if any
    pub fn header(&self) -> Option<&Row> {
        self.headers().next()
    }

    /// Data rows in order, across all sections
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_header(*i))
            .map(|(_, row)| row)
    }

    /// Number of data rows
    pub fn data_row_count(&self) -> usize {
        self.rows.len() - self.header_rows.len()
    }

    /// Check that every data row is as wide as its section's header
    pub fn is_rectangular(&self) -> bool {
        let mut width = None;
        for (i, row) in self.rows.iter().enumerate() {
            if self.is_header(i) {
                width = Some(row.len());
            } else if width != Some(row.len()) {
                return false;
            }
        }
        true
    }
}
