//! Core data types for building the master patient list.
//!
//! - [`PatientId`]: A validated patient number (`XX-A01-AAANNNN`)
//! - [`Sheet`], [`Cell`]: A worksheet loaded into memory
//! - [`SourceLocation`]: A folder scanned for spreadsheet exports
//! - [`ScanResult`]: Deduplicated patient numbers plus per-folder and per-file counts
//!
//! ## Patient Number Format
//!
//! | Part | Shape | Example |
//! |------|-------|---------|
//! | Facility | two uppercase letters | `VR` |
//! | Unit | uppercase letter + two digits | `A01` |
//! | Serial | three uppercase letters + digits | `AAA1234` |
//!
//! Validation anchors at the start of the value only, so `VR-A01-AAA1234 (old)`
//! is accepted as-is.

pub mod identifier;
pub mod sheet;
pub mod types;
