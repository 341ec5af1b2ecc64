//! Backup manager for SafeKeep
//!
//! Snapshots the critical file set into `backups/<name>/`, lists and
//! restores those snapshots, and checks the live tree's integrity.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audit::{SafetyEvent, SafetyLog};
use crate::config::{CriticalFileSet, ProjectPaths};
use crate::error::{SafekeepError, SafekeepResult};
use crate::storage::{copy_file_with_metadata, copy_tree, replace_tree};

use super::integrity::IntegrityReport;
use super::manifest::{backup_timestamp, read_manifest, write_manifest, BackupManifest};

/// A listed backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSummary {
    /// Directory name under `backups/`
    pub name: String,
    /// Full path to the backup directory
    pub path: PathBuf,
    /// Manifest timestamp (`YYYYMMDD_HHMMSS`)
    pub timestamp: String,
    /// Manifest reason
    pub reason: String,
}

/// Manages backup creation, listing, restore and integrity checks
pub struct BackupManager {
    paths: ProjectPaths,
    critical: CriticalFileSet,
    safety_log: SafetyLog,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: ProjectPaths, critical: CriticalFileSet, safety_log: SafetyLog) -> Self {
        Self {
            paths,
            critical,
            safety_log,
        }
    }

    /// Create a timestamped backup named `backup_<timestamp>_<reason>`
    ///
    /// Two calls within the same second with the same reason share a name;
    /// the second merges into the first. A reason that would escape the
    /// backup directory is rejected with a `Config` error.
    pub fn create_backup(&self, reason: &str) -> SafekeepResult<PathBuf> {
        validate_reason(reason)?;
        let timestamp = backup_timestamp();
        let name = format!("backup_{}_{}", timestamp, reason);
        self.create_snapshot(&name, reason, &timestamp)
    }

    /// Create a backup tagged `before_<operation>`
    pub fn auto_backup_before(&self, operation: &str) -> SafekeepResult<PathBuf> {
        self.create_backup(&format!("before_{}", operation))
    }

    /// Snapshot the critical file set under an explicit directory name
    ///
    /// Missing critical paths are skipped. The manifest is written only once
    /// every present path has been copied. Outcome is recorded in the safety
    /// log as `backup_created` or `backup_failed`.
    pub fn create_snapshot(
        &self,
        name: &str,
        reason: &str,
        timestamp: &str,
    ) -> SafekeepResult<PathBuf> {
        match self.write_snapshot(name, reason, timestamp) {
            Ok(path) => {
                tracing::info!(backup = name, "backup created");
                self.safety_log
                    .record(SafetyEvent::BackupCreated, format!("Backup created: {}", name));
                Ok(path)
            }
            Err(e) => {
                tracing::warn!(backup = name, error = %e, "backup failed");
                self.safety_log
                    .record(SafetyEvent::BackupFailed, format!("Backup failed: {}", e));
                Err(e)
            }
        }
    }

    fn write_snapshot(&self, name: &str, reason: &str, timestamp: &str) -> SafekeepResult<PathBuf> {
        let backup_path = self.paths.backup_dir().join(name);
        fs::create_dir_all(&backup_path).map_err(|e| {
            SafekeepError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let mut first_error = None;

        for entry in self.critical.iter() {
            let src = self.paths.root().join(entry.relative());
            let dst = backup_path.join(entry.relative());

            let copied = if src.is_file() {
                copy_file_with_metadata(&src, &dst)
            } else if src.is_dir() {
                copy_tree(&src, &dst)
            } else {
                tracing::debug!(path = %entry.path, "critical path absent, skipping");
                continue;
            };

            if let Err(e) = copied {
                tracing::warn!(path = %entry.path, error = %e, "failed to back up path");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let manifest = BackupManifest::new(timestamp, reason, self.critical.paths(), &backup_path);
        write_manifest(&backup_path, &manifest)?;

        Ok(backup_path)
    }

    /// Restore every critical path present in the named backup
    ///
    /// Files are overwritten and directories replaced wholesale; paths the
    /// backup does not contain are left untouched. The live tree is not
    /// rolled back if a copy fails part way.
    pub fn restore_from_backup(&self, name: &str) -> SafekeepResult<()> {
        let backup_path = self.paths.backup_dir().join(name);

        let result = if backup_path.is_dir() {
            self.restore_paths(&backup_path)
        } else {
            Err(SafekeepError::backup_not_found(name))
        };

        match &result {
            Ok(()) => {
                tracing::info!(backup = name, "restore completed");
                self.safety_log.record(
                    SafetyEvent::RestoreCompleted,
                    format!("Restored from backup: {}", name),
                );
            }
            Err(e) => {
                tracing::warn!(backup = name, error = %e, "restore failed");
                self.safety_log
                    .record(SafetyEvent::RestoreFailed, format!("Restore failed: {}", e));
            }
        }

        result
    }

    fn restore_paths(&self, backup_path: &Path) -> SafekeepResult<()> {
        // The manifest is informational; the static set drives the restore
        match read_manifest(backup_path) {
            Ok(manifest) => tracing::debug!(
                timestamp = %manifest.timestamp,
                reason = %manifest.reason,
                "restoring backup"
            ),
            Err(e) => tracing::debug!(error = %e, "restoring backup without manifest"),
        }

        let mut first_error = None;

        for entry in self.critical.iter() {
            let src = backup_path.join(entry.relative());
            let dst = self.paths.root().join(entry.relative());

            let restored = if src.is_file() {
                copy_file_with_metadata(&src, &dst)
            } else if src.is_dir() {
                replace_tree(&src, &dst)
            } else {
                continue;
            };

            if let Err(e) = restored {
                tracing::warn!(path = %entry.path, error = %e, "failed to restore path");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Check that every critical path exists and no critical file is empty
    ///
    /// Does not touch the live tree; the result is recorded in the safety log.
    pub fn check_file_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for entry in self.critical.iter() {
            let path = self.paths.root().join(entry.relative());
            match fs::metadata(&path) {
                Err(_) => report.missing.push(entry.path.clone()),
                Ok(meta) if meta.is_file() && meta.len() == 0 => {
                    report.corrupted.push(entry.path.clone())
                }
                Ok(_) => {}
            }
        }

        if report.is_healthy() {
            self.safety_log
                .record(SafetyEvent::IntegrityCheckPassed, "All critical files intact");
        } else {
            self.safety_log
                .record(SafetyEvent::IntegrityCheckFailed, report.to_details());
        }

        report
    }

    /// List backups that carry a readable manifest, newest first
    pub fn list_backups(&self) -> SafekeepResult<Vec<BackupSummary>> {
        let mut backups = Vec::new();

        for path in self.backup_directories()? {
            let manifest = match read_manifest(&path) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping backup without manifest");
                    continue;
                }
            };

            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            backups.push(BackupSummary {
                name,
                path,
                timestamp: manifest.timestamp,
                reason: manifest.reason,
            });
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> SafekeepResult<Option<BackupSummary>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Every directory under the backup root, in directory iteration order
    pub fn backup_directories(&self) -> SafekeepResult<Vec<PathBuf>> {
        let backup_dir = self.paths.backup_dir();
        if !backup_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&backup_dir).map_err(|e| {
            SafekeepError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| SafekeepError::Io(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }

        Ok(dirs)
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn critical_files(&self) -> &CriticalFileSet {
        &self.critical
    }

    pub fn safety_log(&self) -> &SafetyLog {
        &self.safety_log
    }
}

/// A reason becomes part of a directory name, so it must be a single component
fn validate_reason(reason: &str) -> SafekeepResult<()> {
    if reason.is_empty() || reason.contains(['/', '\\']) || reason.contains("..") {
        return Err(SafekeepError::Config(format!(
            "Invalid backup reason '{}': must be a plain name without '/', '\\' or '..'",
            reason
        )));
    }
    Ok(())
}
