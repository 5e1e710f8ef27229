use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Regular expression for a patient number, anchored at the start only.
///
/// Trailing content after a valid prefix is accepted.
pub const PATIENT_ID_PATTERN: &str = r"^[A-Z]{2}-[A-Z]\d{2}-[A-Z]{3}\d+";

/// Human-readable description of the patient number format
pub const PATIENT_ID_FORMAT: &str =
    "XX-A01-AAANNNN (one patient number per line, all facility codes)";

static PATIENT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII-only classes so full-width letters and other Unicode digits are rejected
    Regex::new(&format!("(?-u){PATIENT_ID_PATTERN}")).expect("patient number pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Empty patient number")]
    Empty,

    #[error("Value does not match patient number format: '{0}'")]
    Rejected(String),
}

/// Check whether a string starts with a well-formed patient number.
///
/// The check is case-sensitive and does not trim: leading whitespace or any
/// other leading character rejects the value.
#[must_use]
pub fn is_valid(s: &str) -> bool {
    PATIENT_ID_RE.is_match(s)
}

/// A validated patient number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Trim and validate a candidate value.
    ///
    /// The stored value is the whole trimmed string, including anything after
    /// the matched prefix.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError::Empty` for blank input and
    /// `IdentifierError::Rejected` if the value does not match the format.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if !is_valid(trimmed) {
            return Err(IdentifierError::Rejected(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patient_numbers() {
        assert!(is_valid("AB-C12-DEF345"));
        assert!(is_valid("VR-A01-AAA1"));
        assert!(is_valid("VR-A01-AAA1234567"));
    }

    #[test]
    fn test_invalid_patient_numbers() {
        assert!(!is_valid(""));
        assert!(!is_valid("ab-c12-def345"));
        assert!(!is_valid("AB-C1-DEF345"));
        assert!(!is_valid("AB-C12-DEF"));
        assert!(!is_valid("AB-C12-DE345"));
        assert!(!is_valid("ABC-C12-DEF345"));
        assert!(!is_valid("A1-C12-DEF345"));
        assert!(!is_valid("AB_C12_DEF345"));
    }

    #[test]
    fn test_leading_characters_rejected() {
        assert!(!is_valid(" AB-C12-DEF345"));
        assert!(!is_valid("xAB-C12-DEF345"));
        assert!(!is_valid("#AB-C12-DEF345"));
    }

    #[test]
    fn test_prefix_semantics_accept_trailing_content() {
        assert!(is_valid("AB-C12-DEF345 (readmitted)"));
        assert!(is_valid("AB-C12-DEF345x"));
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!is_valid("ÀB-C12-DEF345"));
        // Arabic-Indic digits
        assert!(!is_valid("AB-C١٢-DEF345"));
    }

    #[test]
    fn test_parse_trims() {
        let id = PatientId::parse("  VR-A01-AAA2345\t").unwrap();
        assert_eq!(id.as_str(), "VR-A01-AAA2345");
        assert_eq!(id.to_string(), "VR-A01-AAA2345");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PatientId::parse("   "), Err(IdentifierError::Empty));
        assert_eq!(
            PatientId::parse("Total"),
            Err(IdentifierError::Rejected("Total".to_string()))
        );
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let a = PatientId::parse("VR-A01-AAA1").unwrap();
        let b = PatientId::parse("VR-A01-AAA1 ").unwrap();
        assert_eq!(a, b);
        assert!(PatientId::parse("vr-A01-AAA1").is_err());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids: Vec<PatientId> = ["VR-A01-AAA2", "AB-C12-DEF10", "VR-A01-AAA10"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(PatientId::as_str).collect();
        assert_eq!(sorted, vec!["AB-C12-DEF10", "VR-A01-AAA10", "VR-A01-AAA2"]);
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let id: PatientId = serde_json::from_str("\"VR-A01-AAA1\"").unwrap();
        assert_eq!(id.as_str(), "VR-A01-AAA1");
        assert!(serde_json::from_str::<PatientId>("\"nope\"").is_err());
    }
}
