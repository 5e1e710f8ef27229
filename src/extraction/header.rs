use serde::Serialize;

use crate::core::sheet::Sheet;
use crate::extraction::ExtractError;

/// Default number of rows searched for the header row
pub const DEFAULT_MAX_SEARCH_ROWS: usize = 20;

/// Default minimum number of filled cells for a row to count as the header
pub const DEFAULT_MIN_FILLED_CELLS: usize = 5;

/// Default substrings a header label must contain (after lowercasing)
pub const DEFAULT_REQUIRED_TERMS: &[&str] = &["patient", "no"];

/// Thresholds for locating the header row and the patient number column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderHeuristics {
    /// Rows searched from the top of the sheet
    pub max_search_rows: usize,
    /// Filled cells required in the header row
    pub min_filled_cells: usize,
    /// Lowercase substrings that must all appear in the patient number header
    pub required_terms: Vec<String>,
}

impl Default for HeaderHeuristics {
    fn default() -> Self {
        Self {
            max_search_rows: DEFAULT_MAX_SEARCH_ROWS,
            min_filled_cells: DEFAULT_MIN_FILLED_CELLS,
            required_terms: DEFAULT_REQUIRED_TERMS
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
        }
    }
}

/// Where the header and patient number column were found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderLocation {
    /// 0-based index of the header row
    pub header_row: usize,
    /// 0-based index of the patient number column
    pub id_column: usize,
    /// Trimmed header labels, index-aligned with the sheet's columns
    pub headers: Vec<String>,
}

impl HeaderLocation {
    /// Label of the patient number column
    #[must_use]
    pub fn id_header(&self) -> &str {
        &self.headers[self.id_column]
    }
}

/// Finds the header row and patient number column in a sheet.
///
/// Exports differ in how many title rows precede the table, so the header is
/// taken to be the first row near the top with enough filled cells.
#[derive(Debug, Clone, Default)]
pub struct HeaderLocator {
    heuristics: HeaderHeuristics,
}

impl HeaderLocator {
    #[must_use]
    pub fn new(heuristics: HeaderHeuristics) -> Self {
        Self { heuristics }
    }

    #[must_use]
    pub fn heuristics(&self) -> &HeaderHeuristics {
        &self.heuristics
    }

    /// Locate the header row and patient number column
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::HeaderNotFound` if no row within the search
    /// window has enough filled cells, or `ExtractError::ColumnNotFound` if the
    /// header row has no label containing every required term.
    pub fn locate(&self, sheet: &Sheet) -> Result<HeaderLocation, ExtractError> {
        let header_row = self
            .find_header_row(sheet)
            .ok_or(ExtractError::HeaderNotFound {
                searched_rows: self.heuristics.max_search_rows.min(sheet.row_count()),
                min_filled_cells: self.heuristics.min_filled_cells,
            })?;

        let headers = header_labels(sheet, header_row);

        let id_column = self
            .find_id_column(&headers)
            .ok_or_else(|| ExtractError::ColumnNotFound {
                header_row: header_row + 1,
            })?;

        Ok(HeaderLocation {
            header_row,
            id_column,
            headers,
        })
    }

    /// First row (0-based) within the search window with enough filled cells
    #[must_use]
    pub fn find_header_row(&self, sheet: &Sheet) -> Option<usize> {
        sheet
            .rows()
            .take(self.heuristics.max_search_rows)
            .position(|row| {
                row.iter().filter(|c| c.is_filled()).count() >= self.heuristics.min_filled_cells
            })
    }

    /// First header whose lowercased label contains every required term
    #[must_use]
    pub fn find_id_column(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|header| self.is_id_header(header))
    }

    /// True if `header` names the patient number column.
    ///
    /// Plain substring matching: "Patient Number" matches because "number"
    /// contains "no"; "Patient ID" and "Patient Name" do not.
    #[must_use]
    pub fn is_id_header(&self, header: &str) -> bool {
        if header.is_empty() {
            return false;
        }
        let lower = header.to_lowercase();
        self.heuristics
            .required_terms
            .iter()
            .all(|term| lower.contains(term.as_str()))
    }
}

/// Trimmed labels of a row; empty cells become empty strings
fn header_labels(sheet: &Sheet, row: usize) -> Vec<String> {
    sheet
        .row(row)
        .unwrap_or_default()
        .iter()
        .map(|c| c.text().unwrap_or_default())
        .collect()
}
