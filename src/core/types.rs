use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::identifier::PatientId;

/// A configured folder scanned for spreadsheet exports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocation(pub PathBuf);

impl SourceLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for SourceLocation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Category of a recoverable problem found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Configured folder does not exist
    LocationMissing,
    /// Folder exists but could not be listed
    LocationUnreadable,
    /// File could not be opened or parsed
    FileReadFailure,
    /// No row with enough filled cells near the top of the sheet
    HeaderNotFound,
    /// Header row has no patient number column
    ColumnNotFound,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocationMissing => write!(f, "folder not found"),
            Self::LocationUnreadable => write!(f, "folder unreadable"),
            Self::FileReadFailure => write!(f, "read failure"),
            Self::HeaderNotFound => write!(f, "no header row"),
            Self::ColumnNotFound => write!(f, "no patient number column"),
        }
    }
}

/// A recoverable problem recorded during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub kind: WarningKind,

    /// Folder or file the warning refers to
    pub path: PathBuf,

    pub message: String,
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Outcome of scanning a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Ok,
    Warning(WarningKind),
}

/// Per-file counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: PathBuf,

    /// Unique valid patient numbers found in this file
    pub patients: usize,

    pub status: FileStatus,
}

/// Per-folder results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub location: SourceLocation,

    /// False if the folder was missing or unreadable
    pub scanned: bool,

    pub files: Vec<FileSummary>,

    /// Unique patient numbers found in this folder
    #[serde(skip)]
    pub patients: BTreeSet<PatientId>,
}

impl FolderSummary {
    #[must_use]
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location,
            scanned: false,
            files: Vec::new(),
            patients: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn unique_patients(&self) -> usize {
        self.patients.len()
    }
}

/// Accumulated, deduplicated patient numbers plus scan provenance.
///
/// Every patient number in a folder subset is also in `patients`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Configured folders in scan order, including missing ones
    pub source_locations: Vec<SourceLocation>,

    /// Global set, iterated in lexicographic order
    pub patients: BTreeSet<PatientId>,

    pub folders: Vec<FolderSummary>,

    /// Files attempted, whether or not they could be read
    pub files_scanned: usize,

    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    #[must_use]
    pub fn new(source_locations: Vec<SourceLocation>) -> Self {
        Self {
            source_locations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unique_patients(&self) -> usize {
        self.patients.len()
    }

    /// Patient numbers in ascending order
    pub fn sorted(&self) -> impl Iterator<Item = &PatientId> {
        self.patients.iter()
    }

    /// First `n` patient numbers in ascending order
    #[must_use]
    pub fn sample(&self, n: usize) -> Vec<&PatientId> {
        self.patients.iter().take(n).collect()
    }

    /// Add a finished folder, merging its subset into the global set
    pub fn merge_folder(&mut self, folder: FolderSummary) {
        self.files_scanned += folder.files.len();
        self.patients.extend(folder.patients.iter().cloned());
        self.folders.push(folder);
    }
}
