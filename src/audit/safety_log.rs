//! Capped JSON safety log
//!
//! The log is a single JSON array. Each append reloads the array, pushes the
//! new entry, keeps only the newest `limit` entries and rewrites the file.
//! A log that fails to parse is treated as empty and overwritten on the next
//! append.

use std::path::PathBuf;

use crate::error::SafekeepResult;
use crate::storage::{read_json_or_default, write_json_atomic};

use super::entry::{SafetyEvent, SafetyLogEntry};

/// Default number of entries retained
pub const DEFAULT_LIMIT: usize = 100;

/// Best-effort audit trail of backup, restore and integrity events
#[derive(Debug, Clone)]
pub struct SafetyLog {
    log_path: PathBuf,
    limit: usize,
}

impl SafetyLog {
    /// Create a SafetyLog writing to `log_path`, keeping at most `limit` entries
    pub fn new(log_path: PathBuf, limit: usize) -> Self {
        Self { log_path, limit }
    }

    /// Record an event
    ///
    /// Never fails: a write error is reported through tracing and dropped.
    pub fn record(&self, event: SafetyEvent, details: impl Into<serde_json::Value>) {
        let entry = SafetyLogEntry::new(event, details);
        if let Err(e) = self.append(entry) {
            tracing::warn!(
                path = %self.log_path.display(),
                error = %e,
                "failed to write safety log"
            );
        }
    }

    /// Append an entry, evicting the oldest ones beyond the limit
    pub fn append(&self, entry: SafetyLogEntry) -> SafekeepResult<()> {
        let mut entries = self.read_all();
        entries.push(entry);

        if entries.len() > self.limit {
            let excess = entries.len() - self.limit;
            entries.drain(..excess);
        }

        write_json_atomic(&self.log_path, &entries)
    }

    /// Read every entry, oldest first; an unreadable log reads as empty
    pub fn read_all(&self) -> Vec<SafetyLogEntry> {
        read_json_or_default(&self.log_path)
    }

    /// Read the most recent `count` entries
    pub fn read_recent(&self, count: usize) -> Vec<SafetyLogEntry> {
        let mut entries = self.read_all();
        let start = entries.len().saturating_sub(count);
        entries.split_off(start)
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_log(limit: usize) -> (SafetyLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = SafetyLog::new(temp_dir.path().join("safety_log.json"), limit);
        (log, temp_dir)
    }

    #[test]
    fn test_record_and_read() {
        let (log, _temp) = create_test_log(DEFAULT_LIMIT);

        log.record(SafetyEvent::BackupCreated, "Backup created: b1");

        let entries = log.read_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, SafetyEvent::BackupCreated);
        assert_eq!(entries[0].message(), Some("Backup created: b1"));
    }

    #[test]
    fn test_length_is_min_of_writes_and_limit() {
        let (log, _temp) = create_test_log(DEFAULT_LIMIT);

        for i in 0..50 {
            log.record(SafetyEvent::BackupCreated, format!("entry {}", i));
        }
        assert_eq!(log.read_all().len(), 50);

        for i in 50..130 {
            log.record(SafetyEvent::BackupCreated, format!("entry {}", i));
        }

        let entries = log.read_all();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].message(), Some("entry 30"));
        assert_eq!(entries[99].message(), Some("entry 129"));
    }

    #[test]
    fn test_corrupt_log_is_replaced() {
        let (log, _temp) = create_test_log(DEFAULT_LIMIT);
        fs::write(log.path(), "[{ truncated").unwrap();

        assert!(log.read_all().is_empty());

        log.record(
            SafetyEvent::IntegrityCheckFailed,
            json!({"missing": ["README.md"], "corrupted": []}),
        );

        let entries = log.read_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, SafetyEvent::IntegrityCheckFailed);
    }

    #[test]
    fn test_read_recent() {
        let (log, _temp) = create_test_log(DEFAULT_LIMIT);

        for i in 0..10 {
            log.record(SafetyEvent::RestoreCompleted, format!("restore {}", i));
        }

        let recent = log.read_recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].message(), Some("restore 7"));
        assert_eq!(recent[2].message(), Some("restore 9"));
    }

    #[test]
    fn test_unwritable_log_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the log file should be makes every write fail
        let blocked = temp_dir.path().join("safety_log.json");
        fs::create_dir_all(&blocked).unwrap();

        let log = SafetyLog::new(blocked, DEFAULT_LIMIT);
        log.record(SafetyEvent::BackupFailed, "ignored");
    }
}
