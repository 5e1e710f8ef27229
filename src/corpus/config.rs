use crate::core::types::SourceLocation;
use crate::extraction::header::HeaderHeuristics;

/// Register export folders scanned when none are given, relative to the
/// working directory
pub const DEFAULT_SOURCE_FOLDERS: &[&str] = &[
    "data/opd-register",
    "data/ipd-morbidity-mortality",
    "data/anc-register",
    "data/consulting-room",
    "data/medical-laboratory",
];

/// File extensions scanned when none are given
pub const DEFAULT_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Name prefix of the lock files spreadsheet editors leave next to open workbooks
pub const LOCK_FILE_PREFIX: &str = "~$";

/// Everything that controls a corpus scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Folders to scan, in order
    pub locations: Vec<SourceLocation>,
    /// Lowercase extensions (without the dot) of files to scan
    pub extensions: Vec<String>,
    /// Files whose name starts with this prefix are skipped
    pub lock_file_prefix: String,
    pub heuristics: HeaderHeuristics,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            locations: DEFAULT_SOURCE_FOLDERS
                .iter()
                .map(|f| SourceLocation::from(*f))
                .collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            lock_file_prefix: LOCK_FILE_PREFIX.to_string(),
            heuristics: HeaderHeuristics::default(),
        }
    }
}

impl ScanConfig {
    /// True if a file with this name should be scanned
    #[must_use]
    pub fn accepts_file_name(&self, name: &str) -> bool {
        if name.is_empty() || name.starts_with(&self.lock_file_prefix) {
            return false;
        }

        let Some((_, ext)) = name.rsplit_once('.') else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
