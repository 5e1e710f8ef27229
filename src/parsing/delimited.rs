use std::io::Read;
use std::path::Path;

use crate::core::sheet::Sheet;
use crate::parsing::LoadError;

/// Load a CSV/TSV export as a sheet
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be opened, or
/// `LoadError::Delimited` if a record cannot be parsed (e.g. invalid UTF-8).
pub fn load_delimited(path: &Path, delimiter: u8) -> Result<Sheet, LoadError> {
    let file = std::fs::File::open(path)?;
    read_delimited(file, delimiter)
}

/// Parse delimited text from any reader.
///
/// Records may have different numbers of fields; no row is treated as a header.
///
/// # Errors
///
/// Returns `LoadError::Delimited` if a record cannot be parsed.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Sheet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Delimited(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Sheet::from_text_rows(rows))
}
