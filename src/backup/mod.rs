//! Backup system for SafeKeep
//!
//! Snapshots the critical file set, lists and restores snapshots, and
//! checks the live tree's integrity.
//!
//! # Backup Layout
//!
//! Each backup is a directory under `backups/` holding copies of the
//! critical paths plus a `manifest.json`:
//! - `timestamp`: `YYYYMMDD_HHMMSS` creation time
//! - `reason`: free-text tag (`manual`, `safety_check`, `emergency`, ...)
//! - `files`: the critical paths at creation time
//! - `backup_path`: where the backup was written
//!
//! # Example
//!
//! ```rust,ignore
//! use safekeep::backup::BackupManager;
//!
//! let manager = BackupManager::new(paths, settings.critical_file_set(), safety_log);
//! let backup_path = manager.create_backup("manual")?;
//!
//! let report = manager.check_file_integrity();
//! if !report.is_healthy() {
//!     if let Some(latest) = manager.latest_backup()? {
//!         manager.restore_from_backup(&latest.name)?;
//!     }
//! }
//! ```

mod check;
mod integrity;
mod manager;
mod manifest;

pub use check::{run_safety_check, CheckOutcome, SafetyCheckRun, SAFETY_CHECK_REASON};
pub use integrity::IntegrityReport;
pub use manager::{BackupManager, BackupSummary};
pub use manifest::{backup_timestamp, read_manifest, write_manifest, BackupManifest, MANIFEST_FILE};
