//! File recovery for SafeKeep
//!
//! Recovery is additive: only missing critical paths are restored, and
//! only from backup directories. Loose source copies and project-wide
//! matches are discovered and reported but not used for per-file lookup.
//!
//! The interactive workflow runs strictly in order and ends in one of three
//! states:
//!
//! 1. Scan for missing critical paths (nothing missing: `Healthy`)
//! 2. Discover recovery sources (none found: `NoSources`)
//! 3. Take an emergency backup of whatever still exists
//! 4. Recover missing paths from backups
//! 5. Append one line to the recovery log (`Completed`)

mod engine;
mod sources;

pub use engine::{
    FileStatus, RecoveryEngine, RecoveryOutcome, RecoveryResult, RecoveryRun,
    TargetedRecovery,
};
pub use sources::{loose_source_candidates, project_scan_candidates, RecoverySource, SourceKind};
