//! Patient number extraction from a single sheet.
//!
//! Extraction runs in two steps:
//!
//! 1. [`header::HeaderLocator`] finds the header row (first of the top 20 rows
//!    with at least 5 filled cells) and the patient number column (first label
//!    containing both "patient" and "no", case-insensitive).
//! 2. [`extract::SheetExtractor`] reads that column from every later row and
//!    keeps the values that parse as a [`PatientId`](crate::core::identifier::PatientId).
//!
//! Values that fail validation are dropped without a warning; register
//! exports routinely contain totals, notes, and blank padding in that column.

use thiserror::Error;

pub mod extract;
pub mod header;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No header row found (no row in the first {searched_rows} with at least {min_filled_cells} filled cells)")]
    HeaderNotFound {
        searched_rows: usize,
        min_filled_cells: usize,
    },

    #[error("No 'Patient No.' column found in header row {header_row}")]
    ColumnNotFound { header_row: usize },
}
