//! Table types.

use serde::{Deserialize, Serialize};

/// A pipe-delimited table: one header row and ordered body rows.
///
/// Cells hold raw cell text. After parsing every body row has exactly
/// `header.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<String>,

    /// Body rows (separator row excluded)
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given header and no body rows.
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a body row.
    pub fn add_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of columns (the header width).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid rows in the rendered table (header + body).
    pub fn grid_row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Check whether any body row differs in width from the header.
    pub fn is_ragged(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().any(|row| row.len() != width)
    }

    /// Get plain text representation of the table (tab-separated).
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
