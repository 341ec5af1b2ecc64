//! Safety log entry data structures
//!
//! Defines the event kinds recorded in the safety log and the entry format
//! itself.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Local timestamp with microsecond precision, e.g. `2025-10-22T01:56:30.123456`
pub fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Events recorded in the safety log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyEvent {
    BackupCreated,
    BackupFailed,
    RestoreCompleted,
    RestoreFailed,
    IntegrityCheckPassed,
    IntegrityCheckFailed,
}

impl std::fmt::Display for SafetyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SafetyEvent::BackupCreated => "backup_created",
            SafetyEvent::BackupFailed => "backup_failed",
            SafetyEvent::RestoreCompleted => "restore_completed",
            SafetyEvent::RestoreFailed => "restore_failed",
            SafetyEvent::IntegrityCheckPassed => "integrity_check_passed",
            SafetyEvent::IntegrityCheckFailed => "integrity_check_failed",
        };
        write!(f, "{}", name)
    }
}

/// A single safety log entry
///
/// `details` is either a plain message string or a structured JSON object
/// (for example the missing/corrupted lists of a failed integrity check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyLogEntry {
    /// When the event occurred (local time)
    pub timestamp: String,

    /// Kind of event
    pub event: SafetyEvent,

    /// Message or structured payload
    pub details: serde_json::Value,
}

impl SafetyLogEntry {
    /// Create an entry stamped with the current time
    pub fn new(event: SafetyEvent, details: impl Into<serde_json::Value>) -> Self {
        Self {
            timestamp: now_iso(),
            event,
            details: details.into(),
        }
    }

    /// Details as a message, if they are a plain string
    pub fn message(&self) -> Option<&str> {
        self.details.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serializes_snake_case() {
        let json = serde_json::to_string(&SafetyEvent::IntegrityCheckFailed).unwrap();
        assert_eq!(json, "\"integrity_check_failed\"");
        assert_eq!(SafetyEvent::BackupCreated.to_string(), "backup_created");
    }

    #[test]
    fn test_string_details() {
        let entry = SafetyLogEntry::new(SafetyEvent::BackupCreated, "Backup created: b1");
        assert_eq!(entry.message(), Some("Backup created: b1"));
    }

    #[test]
    fn test_structured_details() {
        let entry = SafetyLogEntry::new(
            SafetyEvent::IntegrityCheckFailed,
            json!({"missing": ["README.md"], "corrupted": []}),
        );
        assert!(entry.message().is_none());
        assert_eq!(entry.details["missing"][0], "README.md");
    }

    #[test]
    fn test_reads_existing_log_format() {
        let raw = r#"{
            "timestamp": "2025-10-22T01:56:30.518410",
            "event": "backup_created",
            "details": "Backup created: backup_20251022_015630_safety_check"
        }"#;
        let entry: SafetyLogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.event, SafetyEvent::BackupCreated);
    }

    #[test]
    fn test_timestamp_has_microseconds() {
        let stamp = now_iso();
        let fraction = stamp.rsplit('.').next().unwrap();
        assert_eq!(fraction.len(), 6);
    }
}
