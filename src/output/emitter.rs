use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identifier::PATIENT_ID_FORMAT;
use crate::core::types::ScanResult;

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "master-patient-list.txt";

/// Label of the header line carrying the unique patient count
pub const TOTAL_PATIENTS_LABEL: &str = "Total unique patients:";

/// Marker that starts every header line
pub const COMMENT_MARKER: &str = "#";

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to write patient list to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the patient list: comment header block followed by one patient
/// number per line in ascending order.
///
/// Lines are joined with `\n` without a trailing newline.
#[must_use]
pub fn render(result: &ScanResult, generated_at: &DateTime<Local>) -> String {
    let source_folders = result
        .source_locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        "# LHIMS Master Patient List".to_string(),
        "# Generated automatically from extracted Excel files".to_string(),
        COMMENT_MARKER.to_string(),
        format!("# Generated on: {}", generated_at.to_rfc3339()),
        format!("# {TOTAL_PATIENTS_LABEL} {}", result.unique_patients()),
        format!("# Files scanned: {}", result.files_scanned),
        format!("# Source folders: {source_folders}"),
        COMMENT_MARKER.to_string(),
        format!("# Format: {PATIENT_ID_FORMAT}"),
        "# Lines starting with # are comments and will be ignored".to_string(),
        COMMENT_MARKER.to_string(),
        String::new(),
    ];
    lines.extend(result.sorted().map(ToString::to_string));

    lines.join("\n")
}

/// Write the patient list to `path`
///
/// # Errors
///
/// Returns `EmitError::Write` if the file cannot be written.
pub fn emit(result: &ScanResult, path: &Path, generated_at: &DateTime<Local>) -> Result<(), EmitError> {
    std::fs::write(path, render(result, generated_at)).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::PatientId;
    use crate::core::types::SourceLocation;
    use crate::parsing::patient_list::parse_patient_list_text;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn result_with(ids: &[&str], files: usize) -> ScanResult {
        let mut result = ScanResult::new(vec![
            SourceLocation::new("data/opd-register"),
            SourceLocation::new("data/anc-register"),
        ]);
        for id in ids {
            result.patients.insert(PatientId::parse(id).unwrap());
        }
        result.files_scanned = files;
        result
    }

    #[test]
    fn test_render_header_and_sorted_body() {
        let result = result_with(&["VR-A01-AAA2", "AB-C12-DEF345", "VR-A01-AAA10"], 4);
        let text = render(&result, &fixed_time());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# LHIMS Master Patient List");
        assert!(lines[3].starts_with("# Generated on: 2024-03-01T09:30:00"));
        assert_eq!(lines[4], "# Total unique patients: 3");
        assert_eq!(lines[5], "# Files scanned: 4");
        assert_eq!(
            lines[6],
            "# Source folders: data/opd-register, data/anc-register"
        );
        assert_eq!(
            lines[8],
            "# Format: XX-A01-AAANNNN (one patient number per line, all facility codes)"
        );
        assert_eq!(lines[11], "");
        assert_eq!(&lines[12..], &["AB-C12-DEF345", "VR-A01-AAA10", "VR-A01-AAA2"]);
    }

    #[test]
    fn test_render_empty_result() {
        let result = result_with(&[], 0);
        let text = render(&result, &fixed_time());
        assert!(text.contains("# Total unique patients: 0"));
        assert!(text.contains("# Files scanned: 0"));
        assert!(text
            .lines()
            .all(|l| l.is_empty() || l.starts_with(COMMENT_MARKER)));
    }

    #[test]
    fn test_rendered_list_reads_back() {
        let result = result_with(&["VR-A01-AAA2", "VR-A01-AAA1"], 1);
        let list = parse_patient_list_text(&render(&result, &fixed_time()));
        assert_eq!(list.patients.len(), 2);
        assert_eq!(list.declared_total, Some(2));
        assert!(list.is_sorted());
        assert!(list.is_clean());
    }

    #[test]
    fn test_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT_FILE);
        emit(&result_with(&["VR-A01-AAA1"], 1), &path, &fixed_time()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("\nVR-A01-AAA1"));
    }

    #[test]
    fn test_emit_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("list.txt");
        let err = emit(&result_with(&[], 0), &path, &fixed_time()).unwrap_err();
        assert!(err.to_string().contains("missing-dir"));
    }
}
