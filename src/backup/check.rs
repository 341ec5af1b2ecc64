//! The routine safety check
//!
//! Checks integrity, restores the latest backup if anything is wrong, and
//! finishes by taking a fresh `safety_check` backup.

use std::path::PathBuf;

use super::integrity::IntegrityReport;
use super::manager::{BackupManager, BackupSummary};

/// Reason tag for the backup taken at the end of every check
pub const SAFETY_CHECK_REASON: &str = "safety_check";

/// How the integrity problems (if any) were handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing was missing or corrupted
    Healthy,
    /// The named backup was restored
    Restored(String),
    /// Restoring the named backup failed
    RestoreFailed(String),
    /// Problems were found but no backup exists
    NoBackups,
}

/// Everything a safety check observed and did
#[derive(Debug, Clone)]
pub struct SafetyCheckRun {
    pub integrity: IntegrityReport,
    pub outcome: CheckOutcome,
    /// Most recent backups after any restore, newest first
    pub recent_backups: Vec<BackupSummary>,
    /// Total number of listed backups
    pub backup_count: usize,
    /// The backup taken at the end of the check, if it succeeded
    pub new_backup: Option<PathBuf>,
}

/// Run the safety check, listing at most `display_count` recent backups
pub fn run_safety_check(manager: &BackupManager, display_count: usize) -> SafetyCheckRun {
    let integrity = manager.check_file_integrity();

    let outcome = if integrity.is_healthy() {
        CheckOutcome::Healthy
    } else {
        match manager.latest_backup() {
            Ok(Some(latest)) => match manager.restore_from_backup(&latest.name) {
                Ok(()) => CheckOutcome::Restored(latest.name),
                Err(_) => CheckOutcome::RestoreFailed(latest.name),
            },
            Ok(None) => CheckOutcome::NoBackups,
            Err(e) => {
                tracing::warn!(error = %e, "could not list backups");
                CheckOutcome::NoBackups
            }
        }
    };

    let backups = manager.list_backups().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not list backups");
        Vec::new()
    });
    let backup_count = backups.len();
    let recent_backups = backups.into_iter().take(display_count).collect();

    let new_backup = manager.create_backup(SAFETY_CHECK_REASON).ok();

    SafetyCheckRun {
        integrity,
        outcome,
        recent_backups,
        backup_count,
        new_backup,
    }
}
