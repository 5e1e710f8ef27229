//! Reader for generated master patient lists.
//!
//! Consumers treat the file as one patient number per line. Blank lines and
//! lines starting with `#` are ignored. The `# Total unique patients:` header
//! line, when present, is kept so the body can be checked against it.

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::core::identifier::PatientId;
use crate::output::emitter::TOTAL_PATIENTS_LABEL;

/// A line that is neither a comment nor a valid patient number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    /// 1-based line number
    pub line: usize,
    pub content: String,
}

/// Patient list as read by downstream consumers
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientList {
    /// Patient numbers in file order, duplicates included
    pub patients: Vec<PatientId>,

    pub invalid: Vec<InvalidLine>,

    /// Number of entries that repeat an earlier entry
    pub duplicates: usize,

    /// Count declared in the comment header, if any
    pub declared_total: Option<usize>,
}

impl PatientList {
    #[must_use]
    pub fn unique_patients(&self) -> usize {
        self.patients.len() - self.duplicates
    }

    /// True if entries are strictly ascending (sorted, no duplicates)
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.patients.windows(2).all(|w| w[0] < w[1])
    }

    /// True if the declared total (when present) matches the unique count
    #[must_use]
    pub fn total_matches(&self) -> bool {
        self.declared_total
            .is_none_or(|declared| declared == self.unique_patients())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty() && self.duplicates == 0 && self.total_matches()
    }
}

/// Read a patient list file
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be read.
pub fn parse_patient_list_file(path: &Path) -> std::io::Result<PatientList> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_patient_list_text(&content))
}

/// Parse patient list text
#[must_use]
pub fn parse_patient_list_text(text: &str) -> PatientList {
    let mut list = PatientList::default();
    let mut seen = HashSet::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(value) = comment.trim().strip_prefix(TOTAL_PATIENTS_LABEL) {
                list.declared_total = value.trim().parse().ok();
            }
            continue;
        }

        match PatientId::parse(line) {
            Ok(id) => {
                if !seen.insert(id.clone()) {
                    list.duplicates += 1;
                }
                list.patients.push(id);
            }
            Err(_) => list.invalid.push(InvalidLine {
                line: i + 1,
                content: line.to_string(),
            }),
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# LHIMS Master Patient List\n#\n# Total unique patients: 2\n\nVR-A01-AAA1\nVR-A01-AAA2\n";
        let list = parse_patient_list_text(text);
        assert_eq!(list.patients.len(), 2);
        assert_eq!(list.declared_total, Some(2));
        assert!(list.is_sorted());
        assert!(list.is_clean());
    }

    #[test]
    fn test_parse_reports_invalid_lines() {
        let text = "VR-A01-AAA1\nnot-a-patient\nVR-A01-AAA2\n";
        let list = parse_patient_list_text(text);
        assert_eq!(list.patients.len(), 2);
        assert_eq!(
            list.invalid,
            vec![InvalidLine {
                line: 2,
                content: "not-a-patient".to_string()
            }]
        );
        assert!(!list.is_clean());
    }

    #[test]
    fn test_parse_counts_duplicates() {
        let text = "VR-A01-AAA1\nVR-A01-AAA1\n";
        let list = parse_patient_list_text(text);
        assert_eq!(list.duplicates, 1);
        assert_eq!(list.unique_patients(), 1);
        assert!(!list.is_sorted());
    }

    #[test]
    fn test_declared_total_mismatch() {
        let text = "# Total unique patients: 5\nVR-A01-AAA1\n";
        let list = parse_patient_list_text(text);
        assert!(!list.total_matches());
    }

    #[test]
    fn test_declared_total_accepts_missing_header() {
        let list = parse_patient_list_text("VR-A01-AAA1\n");
        assert_eq!(list.declared_total, None);
        assert!(list.total_matches());
    }
}
