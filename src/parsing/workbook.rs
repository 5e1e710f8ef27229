//! Workbook loading via calamine.
//!
//! calamine trims leading empty rows and columns from a worksheet range; they
//! are restored here so row and column positions match what users see in the
//! spreadsheet.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

use crate::core::sheet::{Cell, Sheet};
use crate::parsing::LoadError;

/// Load the first worksheet of a workbook
///
/// # Errors
///
/// Returns `LoadError::Workbook` if the file cannot be opened or parsed, or
/// `LoadError::NoWorksheet` if it contains no worksheets.
pub fn load_workbook(path: &Path) -> Result<Sheet, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Workbook(e.to_string()))?;

    let name = workbook.sheet_names().first().cloned();

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)?
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let sheet = range_to_sheet(&range);
    debug!(
        path = %path.display(),
        worksheet = name.as_deref().unwrap_or(""),
        rows = sheet.row_count(),
        "loaded workbook"
    );

    Ok(match name {
        Some(name) => sheet.with_name(name),
        None => sheet,
    })
}

/// Convert a calamine range into a sheet anchored at A1
#[must_use]
pub fn range_to_sheet(range: &Range<Data>) -> Sheet {
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::default();
    };

    let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();

    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(data_to_cell));

        // Ranges are rectangular; dropping trailing blanks keeps sparse rows small
        while matches!(cells.last(), Some(Cell::Empty)) {
            cells.pop();
        }
        rows.push(cells);
    }

    Sheet::new(rows)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::DateTime(ndt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::DateTime(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
