//! Scanning folders of register exports.
//!
//! A [`scanner::CorpusScanner`] is built from an explicit [`config::ScanConfig`]
//! and a [`SheetLoader`](crate::parsing::SheetLoader), so tests can point it at
//! temporary folders and in-memory sheets.
//!
//! ## Failure Handling
//!
//! | Problem | Effect |
//! |---------|--------|
//! | Folder missing | warning, folder skipped |
//! | File unreadable or corrupt | warning, file contributes nothing |
//! | No header row / no patient number column | warning, file contributes nothing |
//! | Cell fails validation | dropped silently |
//!
//! Every attempted file counts towards `files_scanned`.

pub mod config;
pub mod scanner;
