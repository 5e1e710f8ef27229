//! Loaders that turn spreadsheet exports into in-memory [`Sheet`]s.
//!
//! This module provides:
//!
//! - **Workbooks** (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`): read with calamine,
//!   first worksheet only
//! - **Delimited text** (`.csv`, `.tsv`): read with the csv crate
//! - **Patient lists**: read a generated master patient list back
//!
//! ## Example
//!
//! ```rust,no_run
//! use patient_list::parsing::{FileSheetLoader, SheetLoader};
//! use std::path::Path;
//!
//! let sheet = FileSheetLoader.load(Path::new("data/opd-register/jan.xlsx")).unwrap();
//! println!("{} rows", sheet.row_count());
//! ```

use std::path::Path;
use thiserror::Error;

use crate::core::sheet::Sheet;

pub mod delimited;
pub mod patient_list;
pub mod workbook;

/// Every extension a [`FileSheetLoader`] can read
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "tsv"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Delimited text error: {0}")]
    Delimited(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Spreadsheet flavours the loader knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
    Tsv,
}

impl SheetFormat {
    /// Detect the format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Source of sheets for the corpus scanner.
///
/// Implementations must release any file handle before returning.
pub trait SheetLoader {
    /// Load the first worksheet of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be opened or parsed.
    fn load(&self, path: &Path) -> Result<Sheet, LoadError>;
}

/// Loads sheets from disk, choosing the reader from the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSheetLoader;

impl SheetLoader for FileSheetLoader {
    fn load(&self, path: &Path) -> Result<Sheet, LoadError> {
        match SheetFormat::from_path(path) {
            Some(SheetFormat::Workbook) => workbook::load_workbook(path),
            Some(SheetFormat::Csv) => delimited::load_delimited(path, b','),
            Some(SheetFormat::Tsv) => delimited::load_delimited(path, b'\t'),
            None => Err(LoadError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| "(no extension)".to_string()),
            )),
        }
    }
}
