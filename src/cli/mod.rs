//! CLI command handlers
//!
//! This module bridges clap argument parsing with the backup and recovery
//! layers. Handlers print human-readable status and return an `ExitStatus`
//! so automation can tell outcomes apart without parsing output.

pub mod backup;
pub mod check;
pub mod recover;

pub use backup::{handle_backup_command, BackupCommands};
pub use check::{handle_check, handle_scan};
pub use recover::{handle_recover, handle_recover_from};

use std::process::ExitCode;

use crate::audit::{RecoveryLog, SafetyLog};
use crate::backup::BackupManager;
use crate::config::{ProjectPaths, Settings};
use crate::recovery::{RecoveryEngine, RecoveryOutcome};

/// Process exit status reported by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Healthy, or everything needed was recovered
    Success,
    /// Some recovery happened but problems remain
    Degraded,
    /// Problems were found and nothing could fix them
    Unrecoverable,
    /// The command itself failed
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Degraded => 1,
            ExitStatus::Unrecoverable => 2,
            ExitStatus::Error => 3,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&RecoveryOutcome> for ExitStatus {
    fn from(outcome: &RecoveryOutcome) -> Self {
        match outcome {
            RecoveryOutcome::Healthy => ExitStatus::Success,
            RecoveryOutcome::NoSources => ExitStatus::Unrecoverable,
            RecoveryOutcome::Completed(result) if result.is_complete() => ExitStatus::Success,
            RecoveryOutcome::Completed(result) if result.recovered.is_empty() => {
                ExitStatus::Unrecoverable
            }
            RecoveryOutcome::Completed(_) => ExitStatus::Degraded,
        }
    }
}

/// Build a BackupManager wired to the project's safety log
pub fn backup_manager(paths: &ProjectPaths, settings: &Settings) -> BackupManager {
    let safety_log = SafetyLog::new(paths.safety_log(), settings.safety_log_limit);
    BackupManager::new(paths.clone(), settings.critical_file_set(), safety_log)
}

/// Build a RecoveryEngine wired to the project's logs
pub fn recovery_engine(paths: &ProjectPaths, settings: &Settings) -> RecoveryEngine {
    RecoveryEngine::new(
        backup_manager(paths, settings),
        RecoveryLog::new(paths.recovery_log()),
    )
}
