use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::identifier::PatientId;
use crate::core::sheet::Sheet;
use crate::extraction::header::{HeaderHeuristics, HeaderLocation, HeaderLocator};
use crate::extraction::ExtractError;

/// Counters describing one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    /// Data rows after the header row
    pub rows_scanned: usize,
    /// Rows too short to reach the patient number column
    pub short_rows: usize,
    /// Rows with an empty patient number cell
    pub empty_cells: usize,
    /// Non-empty values that failed validation
    pub rejected: usize,
    /// Valid values, duplicates included
    pub accepted: usize,
}

/// Patient numbers found in one sheet
#[derive(Debug, Clone)]
pub struct Extraction {
    pub location: HeaderLocation,
    pub patients: BTreeSet<PatientId>,
    pub stats: ExtractStats,
}

/// Reads the patient number column of a sheet
#[derive(Debug, Clone, Default)]
pub struct SheetExtractor {
    locator: HeaderLocator,
}

impl SheetExtractor {
    #[must_use]
    pub fn new(heuristics: HeaderHeuristics) -> Self {
        Self {
            locator: HeaderLocator::new(heuristics),
        }
    }

    /// Valid, unique patient numbers from every row after the header row
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` if the header row or patient number column
    /// cannot be located.
    pub fn extract(&self, sheet: &Sheet) -> Result<BTreeSet<PatientId>, ExtractError> {
        self.extract_with_stats(sheet).map(|e| e.patients)
    }

    /// Like [`extract`](Self::extract), also returning where the header was
    /// found and row-level counters
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` if the header row or patient number column
    /// cannot be located.
    pub fn extract_with_stats(&self, sheet: &Sheet) -> Result<Extraction, ExtractError> {
        let location = self.locator.locate(sheet)?;
        let mut patients = BTreeSet::new();
        let mut stats = ExtractStats::default();

        for row in sheet.rows().skip(location.header_row + 1) {
            stats.rows_scanned += 1;

            let Some(cell) = row.get(location.id_column) else {
                stats.short_rows += 1;
                continue;
            };

            let Some(text) = cell.text() else {
                stats.empty_cells += 1;
                continue;
            };

            match PatientId::parse(&text) {
                Ok(id) => {
                    stats.accepted += 1;
                    patients.insert(id);
                }
                Err(_) => stats.rejected += 1,
            }
        }

        Ok(Extraction {
            location,
            patients,
            stats,
        })
    }
}
