//! # patient-list
//!
//! Build a deduplicated master list of patient numbers from hospital register
//! spreadsheet exports.
//!
//! Register exports (OPD, IPD morbidity/mortality, ANC, consulting room,
//! laboratory) are not uniform: title blocks of varying height sit above the
//! table, and the patient number column moves between reports. `patient-list`
//! finds the header row and the "Patient No." column in each sheet, keeps the
//! values that look like patient numbers, and merges them across every file
//! and folder into one sorted list for the downstream extraction pipeline.
//!
//! ## Features
//!
//! - **Header detection**: first of the top 20 rows with at least 5 filled cells
//! - **Fuzzy column match**: any label containing "patient" and "no"
//! - **Strict validation**: `XX-A01-AAANNNN` patient numbers only
//! - **Fault tolerance**: unreadable files and missing folders are reported, never fatal
//! - **Deterministic output**: lexicographically sorted, independent of scan order
//!
//! ## Example
//!
//! ```rust,no_run
//! use patient_list::{CorpusScanner, FileSheetLoader, ScanConfig};
//! use patient_list::output::emitter;
//! use std::path::Path;
//!
//! let scanner = CorpusScanner::new(ScanConfig::default(), FileSheetLoader);
//! let result = scanner.scan();
//!
//! emitter::emit(&result, Path::new("master-patient-list.txt"), &chrono::Local::now()).unwrap();
//! println!("{} unique patients in {} files", result.unique_patients(), result.files_scanned);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Patient numbers, sheets, and scan results
//! - [`parsing`]: Workbook and CSV loaders, patient list reader
//! - [`extraction`]: Header location and patient number extraction for one sheet
//! - [`corpus`]: Folder scanning and aggregation
//! - [`output`]: Writing the master patient list
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod corpus;
pub mod extraction;
pub mod output;
pub mod parsing;

// Re-export commonly used types for convenience
pub use core::identifier::{is_valid, PatientId};
pub use core::sheet::{Cell, Sheet};
pub use core::types::*;
pub use corpus::config::ScanConfig;
pub use corpus::scanner::{CorpusScanner, ScanObserver};
pub use extraction::extract::SheetExtractor;
pub use extraction::header::{HeaderHeuristics, HeaderLocator};
pub use parsing::{FileSheetLoader, SheetLoader};
