//! Integrity report for the critical file set

use serde::Serialize;

/// Outcome of checking the live tree against the critical file set
///
/// A path is tested for existence first, so it can never be both missing
/// and corrupted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Critical paths that do not exist
    pub missing: Vec<String>,
    /// Critical files that exist but are empty
    pub corrupted: Vec<String>,
}

impl IntegrityReport {
    /// True when nothing is missing or corrupted
    pub fn is_healthy(&self) -> bool {
        self.missing.is_empty() && self.corrupted.is_empty()
    }

    /// Structured payload recorded in the safety log
    pub fn to_details(&self) -> serde_json::Value {
        serde_json::json!({
            "missing": self.missing,
            "corrupted": self.corrupted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_healthy() {
        assert!(IntegrityReport::default().is_healthy());
    }

    #[test]
    fn test_details_payload() {
        let report = IntegrityReport {
            missing: vec!["README.md".into()],
            corrupted: vec!["makefile".into()],
        };

        assert!(!report.is_healthy());
        let details = report.to_details();
        assert_eq!(details["missing"][0], "README.md");
        assert_eq!(details["corrupted"][0], "makefile");
    }
}
