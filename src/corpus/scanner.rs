use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::types::{
    FileStatus, FileSummary, FolderSummary, ScanResult, ScanWarning, SourceLocation, WarningKind,
};
use crate::corpus::config::ScanConfig;
use crate::extraction::extract::SheetExtractor;
use crate::extraction::ExtractError;
use crate::parsing::SheetLoader;

/// Receives progress events while a scan runs.
///
/// All methods default to doing nothing.
pub trait ScanObserver {
    fn folder_started(&mut self, _location: &SourceLocation, _file_count: usize) {}

    /// `index` is 1-based
    fn file_started(&mut self, _index: usize, _total: usize, _path: &Path) {}

    fn file_finished(&mut self, _summary: &FileSummary) {}

    fn warning(&mut self, _warning: &ScanWarning) {}

    fn folder_finished(&mut self, _folder: &FolderSummary) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Scans configured folders and merges the patient numbers of every file.
///
/// Folders are visited in configured order and files in name order, one file
/// open at a time. Per-file and per-folder problems are recorded as warnings
/// on the result; a scan always completes.
pub struct CorpusScanner<L> {
    config: ScanConfig,
    loader: L,
    extractor: SheetExtractor,
}

impl<L: SheetLoader> CorpusScanner<L> {
    pub fn new(config: ScanConfig, loader: L) -> Self {
        let extractor = SheetExtractor::new(config.heuristics.clone());
        Self {
            config,
            loader,
            extractor,
        }
    }

    /// Scan the configured folders
    pub fn scan(&self) -> ScanResult {
        self.scan_with(&mut NoopObserver)
    }

    /// Scan the configured folders, reporting progress to `observer`
    pub fn scan_with(&self, observer: &mut dyn ScanObserver) -> ScanResult {
        self.scan_locations(&self.config.locations, observer)
    }

    /// Scan an explicit list of folders in order
    pub fn scan_locations(
        &self,
        locations: &[SourceLocation],
        observer: &mut dyn ScanObserver,
    ) -> ScanResult {
        let mut result = ScanResult::new(locations.to_vec());

        for location in locations {
            let folder = self.scan_location(location, &mut result.warnings, observer);
            observer.folder_finished(&folder);
            result.merge_folder(folder);
        }

        info!(
            patients = result.unique_patients(),
            files = result.files_scanned,
            warnings = result.warnings.len(),
            "scan complete"
        );

        result
    }

    fn scan_location(
        &self,
        location: &SourceLocation,
        warnings: &mut Vec<ScanWarning>,
        observer: &mut dyn ScanObserver,
    ) -> FolderSummary {
        let mut folder = FolderSummary::new(location.clone());

        if !location.path().exists() {
            record(
                warnings,
                observer,
                ScanWarning {
                    kind: WarningKind::LocationMissing,
                    path: location.path().to_path_buf(),
                    message: format!("Folder not found: {location}"),
                },
            );
            return folder;
        }

        let files = match self.list_files(location.path()) {
            Ok(files) => files,
            Err(e) => {
                record(
                    warnings,
                    observer,
                    ScanWarning {
                        kind: WarningKind::LocationUnreadable,
                        path: location.path().to_path_buf(),
                        message: format!("Cannot list folder {location}: {e}"),
                    },
                );
                return folder;
            }
        };

        folder.scanned = true;
        observer.folder_started(location, files.len());
        debug!(folder = %location, files = files.len(), "scanning folder");

        for (i, path) in files.iter().enumerate() {
            observer.file_started(i + 1, files.len(), path);
            let summary = self.scan_file(path, &mut folder, warnings, observer);
            observer.file_finished(&summary);
            folder.files.push(summary);
        }

        folder
    }

    /// Load one file and merge its patient numbers into the folder subset
    fn scan_file(
        &self,
        path: &Path,
        folder: &mut FolderSummary,
        warnings: &mut Vec<ScanWarning>,
        observer: &mut dyn ScanObserver,
    ) -> FileSummary {
        let name = file_name(path);

        let sheet = match self.loader.load(path) {
            Ok(sheet) => sheet,
            Err(e) => {
                let kind = WarningKind::FileReadFailure;
                record(
                    warnings,
                    observer,
                    ScanWarning {
                        kind,
                        path: path.to_path_buf(),
                        message: format!("Error reading {name}: {e}"),
                    },
                );
                return FileSummary {
                    path: path.to_path_buf(),
                    patients: 0,
                    status: FileStatus::Warning(kind),
                };
            }
        };

        match self.extractor.extract_with_stats(&sheet) {
            Ok(extraction) => {
                debug!(
                    file = %name,
                    header_row = extraction.location.header_row + 1,
                    column = extraction.location.id_header(),
                    rows = extraction.stats.rows_scanned,
                    rejected = extraction.stats.rejected,
                    short_rows = extraction.stats.short_rows,
                    patients = extraction.patients.len(),
                    "extracted patient numbers"
                );
                let count = extraction.patients.len();
                folder.patients.extend(extraction.patients);
                FileSummary {
                    path: path.to_path_buf(),
                    patients: count,
                    status: FileStatus::Ok,
                }
            }
            Err(e) => {
                let kind = match e {
                    ExtractError::HeaderNotFound { .. } => WarningKind::HeaderNotFound,
                    ExtractError::ColumnNotFound { .. } => WarningKind::ColumnNotFound,
                };
                record(
                    warnings,
                    observer,
                    ScanWarning {
                        kind,
                        path: path.to_path_buf(),
                        message: format!("{e} in {name}"),
                    },
                );
                FileSummary {
                    path: path.to_path_buf(),
                    patients: 0,
                    status: FileStatus::Warning(kind),
                }
            }
        }
    }

    /// Spreadsheet files directly inside `dir`, sorted by name.
    ///
    /// Editor lock files and files with unrecognized extensions are skipped.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the directory cannot be read.
    pub fn list_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if self.config.accepts_file_name(&file_name(&path)) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

fn record(warnings: &mut Vec<ScanWarning>, observer: &mut dyn ScanObserver, warning: ScanWarning) {
    debug!(kind = %warning.kind, path = %warning.path.display(), "{}", warning.message);
    observer.warning(&warning);
    warnings.push(warning);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::PatientId;
    use crate::core::sheet::Sheet;
    use crate::parsing::LoadError;
    use std::collections::HashMap;

    /// Serves sheets by file name; names without an entry fail to load
    struct MemoryLoader {
        sheets: HashMap<String, Sheet>,
    }

    impl MemoryLoader {
        fn new(entries: Vec<(&str, Sheet)>) -> Self {
            Self {
                sheets: entries
                    .into_iter()
                    .map(|(n, s)| (n.to_string(), s))
                    .collect(),
            }
        }
    }

    impl SheetLoader for MemoryLoader {
        fn load(&self, path: &Path) -> Result<Sheet, LoadError> {
            self.sheets
                .get(&file_name(path))
                .cloned()
                .ok_or_else(|| LoadError::Workbook("corrupt archive".to_string()))
        }
    }

    fn register(ids: &[&str]) -> Sheet {
        let mut rows = vec![vec!["S/N", "Date", "Patient No.", "Name", "Age"]];
        for id in ids {
            rows.push(vec!["1", "2024-01-01", id, "x", "1"]);
        }
        Sheet::from_text_rows(rows)
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    fn config_for(dirs: &[&Path]) -> ScanConfig {
        ScanConfig {
            locations: dirs.iter().map(|d| SourceLocation::new(*d)).collect(),
            ..ScanConfig::default()
        }
    }

    fn sorted(result: &ScanResult) -> Vec<&str> {
        result.sorted().map(PatientId::as_str).collect()
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.xlsx");
        touch(dir.path(), "a.XLS");
        touch(dir.path(), "~$b.xlsx");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("nested.xlsx")).unwrap();

        let scanner = CorpusScanner::new(ScanConfig::default(), MemoryLoader::new(vec![]));
        let files = scanner.list_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.XLS", "b.xlsx"]);
    }

    #[test]
    fn test_dedup_across_folders() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        touch(a.path(), "jan.xlsx");
        touch(b.path(), "feb.xlsx");

        let loader = MemoryLoader::new(vec![
            ("jan.xlsx", register(&["VR-A01-AAA2", "VR-A01-AAA1"])),
            ("feb.xlsx", register(&["VR-A01-AAA1", "VR-A01-AAA3"])),
        ]);
        let result = CorpusScanner::new(config_for(&[a.path(), b.path()]), loader).scan();

        assert_eq!(sorted(&result), vec!["VR-A01-AAA1", "VR-A01-AAA2", "VR-A01-AAA3"]);
        assert_eq!(result.files_scanned, 2);
        assert_eq!(result.folders[0].unique_patients(), 2);
        assert_eq!(result.folders[1].unique_patients(), 2);
        assert!(result.warnings.is_empty());
        for folder in &result.folders {
            assert!(folder.patients.is_subset(&result.patients));
        }
    }

    #[test]
    fn test_corrupt_file_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1.xlsx");
        touch(dir.path(), "2.xlsx");
        touch(dir.path(), "3.xlsx");

        let loader = MemoryLoader::new(vec![
            ("1.xlsx", register(&["VR-A01-AAA1"])),
            ("3.xlsx", register(&["VR-A01-AAA3"])),
        ]);
        let result = CorpusScanner::new(config_for(&[dir.path()]), loader).scan();

        assert_eq!(sorted(&result), vec!["VR-A01-AAA1", "VR-A01-AAA3"]);
        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::FileReadFailure);
        assert!(result.warnings[0].message.contains("2.xlsx"));
        assert!(result.warnings[0].message.contains("corrupt archive"));
        assert_eq!(
            result.folders[0].files[1].status,
            FileStatus::Warning(WarningKind::FileReadFailure)
        );
    }

    #[test]
    fn test_missing_location_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1.xlsx");
        let missing = dir.path().join("does-not-exist");

        let loader = MemoryLoader::new(vec![("1.xlsx", register(&["VR-A01-AAA1"]))]);
        let result =
            CorpusScanner::new(config_for(&[missing.as_path(), dir.path()]), loader).scan();

        assert_eq!(result.unique_patients(), 1);
        assert_eq!(result.files_scanned, 1);
        assert_eq!(result.warnings[0].kind, WarningKind::LocationMissing);
        assert!(!result.folders[0].scanned);
        assert!(result.folders[1].scanned);
        assert_eq!(result.source_locations.len(), 2);
    }

    #[test]
    fn test_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result =
            CorpusScanner::new(config_for(&[missing.as_path()]), MemoryLoader::new(vec![])).scan();

        assert_eq!(result.unique_patients(), 0);
        assert_eq!(result.files_scanned, 0);
    }

    #[test]
    fn test_header_problems_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "no-header.xlsx");
        touch(dir.path(), "no-column.xlsx");

        let loader = MemoryLoader::new(vec![
            ("no-header.xlsx", Sheet::from_text_rows(vec![vec!["VR-A01-AAA1"]])),
            (
                "no-column.xlsx",
                Sheet::from_text_rows(vec![vec!["S/N", "Date", "Patient ID", "Name", "Age"]]),
            ),
        ]);
        let result = CorpusScanner::new(config_for(&[dir.path()]), loader).scan();

        let kinds: Vec<WarningKind> = result.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::ColumnNotFound, WarningKind::HeaderNotFound]
        );
        assert_eq!(result.files_scanned, 2);
        assert_eq!(result.unique_patients(), 0);
    }

    #[test]
    fn test_location_order_does_not_change_output() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        touch(a.path(), "a.xlsx");
        touch(b.path(), "b.xlsx");
        let entries = || {
            vec![
                ("a.xlsx", register(&["VR-A01-AAA9", "VR-A01-AAA1"])),
                ("b.xlsx", register(&["VR-A01-AAA5", "VR-A01-AAA1"])),
            ]
        };

        let forward =
            CorpusScanner::new(config_for(&[a.path(), b.path()]), MemoryLoader::new(entries()))
                .scan();
        let backward =
            CorpusScanner::new(config_for(&[b.path(), a.path()]), MemoryLoader::new(entries()))
                .scan();

        assert_eq!(sorted(&forward), sorted(&backward));
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ScanObserver for Recorder {
        fn folder_started(&mut self, _location: &SourceLocation, file_count: usize) {
            self.events.push(format!("folder:{file_count}"));
        }
        fn file_started(&mut self, index: usize, total: usize, _path: &Path) {
            self.events.push(format!("file:{index}/{total}"));
        }
        fn file_finished(&mut self, summary: &FileSummary) {
            self.events.push(format!("done:{}", summary.patients));
        }
        fn warning(&mut self, warning: &ScanWarning) {
            self.events.push(format!("warn:{}", warning.kind));
        }
        fn folder_finished(&mut self, folder: &FolderSummary) {
            self.events.push(format!("end:{}", folder.unique_patients()));
        }
    }

    #[test]
    fn test_observer_events() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1.xlsx");
        touch(dir.path(), "2.xlsx");
        let loader = MemoryLoader::new(vec![("1.xlsx", register(&["VR-A01-AAA1", "VR-A01-AAA2"]))]);

        let mut recorder = Recorder::default();
        CorpusScanner::new(config_for(&[dir.path()]), loader).scan_with(&mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "folder:2",
                "file:1/2",
                "done:2",
                "file:2/2",
                "warn:read failure",
                "done:0",
                "end:2",
            ]
        );
    }
}
