//! Audit logging for SafeKeep
//!
//! Two append-only trails are kept at the project root:
//!
//! - `SafetyLog`: a JSON array of structured backup, restore and integrity
//!   events, capped at the newest entries (100 by default). Writes are best
//!   effort and never fail the operation being audited.
//! - `RecoveryLog`: an unbounded plain-text file with one line per recovery
//!   run.
//!
//! # Example
//!
//! ```rust,ignore
//! use safekeep::audit::{SafetyEvent, SafetyLog};
//!
//! let log = SafetyLog::new(paths.safety_log(), 100);
//! log.record(SafetyEvent::BackupCreated, "Backup created: backup_20251022_015630_manual");
//! ```

mod entry;
mod recovery_log;
mod safety_log;

pub use entry::{now_iso, SafetyEvent, SafetyLogEntry};
pub use recovery_log::RecoveryLog;
pub use safety_log::{SafetyLog, DEFAULT_LIMIT};
