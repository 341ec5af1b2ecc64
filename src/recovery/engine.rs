//! Recovery engine for SafeKeep
//!
//! Finds missing critical paths, ranks the places they might be recovered
//! from, and drives the scan, emergency backup, recover, report workflow.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::audit::RecoveryLog;
use crate::backup::{backup_timestamp, BackupManager};
use crate::error::{SafekeepError, SafekeepResult};
use crate::storage::{copy_entry, copy_file_with_metadata, replace_tree};

use super::sources::{loose_source_candidates, project_scan_candidates, RecoverySource, SourceKind};

/// Presence of one critical path in the live tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub path: String,
    pub description: String,
    pub present: bool,
}

/// Paths recovered and paths that could not be recovered
///
/// Targets already present in the live tree appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecoveryResult {
    pub recovered: Vec<String>,
    pub failed: Vec<String>,
}

impl RecoveryResult {
    /// True when nothing failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Terminal state of an interactive recovery run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// Nothing was missing
    Healthy,
    /// Files were missing but no source could be found
    NoSources,
    /// Recovery was attempted
    Completed(RecoveryResult),
}

/// Everything an interactive recovery run observed and did
#[derive(Debug, Clone)]
pub struct RecoveryRun {
    /// Critical paths found missing by the scan
    pub missing: Vec<FileStatus>,
    /// Sources discovered, in ranking order
    pub sources: Vec<RecoverySource>,
    /// Emergency backup taken before recovering, if it succeeded
    pub emergency_backup: Option<PathBuf>,
    pub outcome: RecoveryOutcome,
}

/// What a targeted recovery from one named backup did
#[derive(Debug, Clone)]
pub struct TargetedRecovery {
    /// Backup the targets were taken from
    pub backup: String,
    /// Emergency backup taken before overwriting, if it succeeded
    pub emergency_backup: Option<PathBuf>,
    pub result: RecoveryResult,
}

/// Recovers missing critical paths from backups and other sources
pub struct RecoveryEngine {
    backups: BackupManager,
    recovery_log: RecoveryLog,
}

impl RecoveryEngine {
    pub fn new(backups: BackupManager, recovery_log: RecoveryLog) -> Self {
        Self {
            backups,
            recovery_log,
        }
    }

    fn root(&self) -> &Path {
        self.backups.paths().root()
    }

    /// Presence of every critical path, in declaration order
    pub fn file_statuses(&self) -> Vec<FileStatus> {
        self.backups
            .critical_files()
            .iter()
            .map(|entry| FileStatus {
                path: entry.path.clone(),
                description: entry.description.clone(),
                present: self.root().join(entry.relative()).exists(),
            })
            .collect()
    }

    /// Critical paths that do not exist, with their descriptions
    pub fn scan_for_missing_files(&self) -> Vec<FileStatus> {
        self.file_statuses()
            .into_iter()
            .filter(|status| !status.present)
            .collect()
    }

    /// Candidate sources: backups, then loose `src/` copies, then a project scan
    ///
    /// Backups are listed in directory iteration order, not by recency.
    pub fn find_recovery_sources(&self) -> Vec<RecoverySource> {
        let backup_dirs = self.backups.backup_directories().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not enumerate backups");
            Vec::new()
        });

        let mut sources: Vec<RecoverySource> =
            backup_dirs.into_iter().map(RecoverySource::backup).collect();
        sources.extend(loose_source_candidates(
            self.root(),
            self.backups.critical_files(),
        ));
        sources.extend(project_scan_candidates(self.root()));

        sources
    }

    /// Recover each missing target from the first backup source holding it
    ///
    /// Only `backup` sources are consulted, using the target's own relative
    /// path. Targets already present are never touched. A copy failure from
    /// one source moves on to the next.
    pub fn recover_from_sources(
        &self,
        sources: &[RecoverySource],
        targets: &[String],
    ) -> RecoveryResult {
        let mut result = RecoveryResult::default();

        for target in targets {
            let relative = target.trim_end_matches('/');
            let dst = self.root().join(relative);
            if dst.exists() {
                continue;
            }

            let mut found = false;
            for source in sources.iter().filter(|s| s.kind == SourceKind::Backup) {
                let src = source.path.join(relative);
                if !src.exists() {
                    continue;
                }

                match copy_entry(&src, &dst) {
                    Ok(()) => {
                        tracing::info!(path = %target, source = %source.path.display(), "recovered");
                        found = true;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %target,
                            source = %source.path.display(),
                            error = %e,
                            "recovery from source failed"
                        );
                    }
                }
            }

            if found {
                result.recovered.push(target.clone());
            } else {
                result.failed.push(target.clone());
            }
        }

        result
    }

    /// Restore the given targets from one backup directory
    ///
    /// Unlike `recover_from_sources`, existing live paths are overwritten and
    /// directories replaced. Targets the backup lacks are reported as failed.
    pub fn recover_from_backup(&self, backup_path: &Path, targets: &[String]) -> RecoveryResult {
        let mut result = RecoveryResult::default();

        for target in targets {
            let relative = target.trim_end_matches('/');
            let src = backup_path.join(relative);
            let dst = self.root().join(relative);

            let copied = if src.is_file() {
                copy_file_with_metadata(&src, &dst)
            } else if src.is_dir() {
                replace_tree(&src, &dst)
            } else {
                tracing::debug!(path = %target, "not found in backup");
                result.failed.push(target.clone());
                continue;
            };

            match copied {
                Ok(()) => result.recovered.push(target.clone()),
                Err(e) => {
                    tracing::warn!(path = %target, error = %e, "failed to recover from backup");
                    result.failed.push(target.clone());
                }
            }
        }

        result
    }

    /// Restore selected critical paths from the named backup
    ///
    /// An empty `targets` list means every critical path. Each target must
    /// name a critical path. The live state is snapshotted first because the
    /// restore overwrites whatever is there.
    pub fn recover_named_backup(
        &self,
        name: &str,
        targets: &[String],
    ) -> SafekeepResult<TargetedRecovery> {
        let backup_path = self.backups.paths().backup_dir().join(name);
        if !backup_path.is_dir() {
            return Err(SafekeepError::backup_not_found(name));
        }

        let critical = self.backups.critical_files();
        let targets = if targets.is_empty() {
            critical.paths()
        } else {
            targets
                .iter()
                .map(|t| {
                    critical.find(t).map(|e| e.path.clone()).ok_or_else(|| {
                        SafekeepError::Config(format!("Not a critical path: {}", t))
                    })
                })
                .collect::<SafekeepResult<Vec<_>>>()?
        };

        let emergency_backup = self.create_emergency_backup().ok();
        let result = self.recover_from_backup(&backup_path, &targets);

        let details = format!(
            "{}: Recovered: {:?}, Failed: {:?}",
            name, result.recovered, result.failed
        );
        if let Err(e) = self.recovery_log.log("recover_from_backup", &details) {
            tracing::warn!(error = %e, "failed to write recovery log");
        }

        Ok(TargetedRecovery {
            backup: name.to_string(),
            emergency_backup,
            result,
        })
    }

    /// Snapshot whatever critical paths currently exist as `emergency_backup_<timestamp>`
    pub fn create_emergency_backup(&self) -> SafekeepResult<PathBuf> {
        let timestamp = backup_timestamp();
        let name = format!("emergency_backup_{}", timestamp);
        self.backups.create_snapshot(&name, "emergency", &timestamp)
    }

    /// Scan, take an emergency backup, recover, and log the result
    pub fn interactive_recovery(&self) -> RecoveryRun {
        let missing = self.scan_for_missing_files();
        if missing.is_empty() {
            return RecoveryRun {
                missing,
                sources: Vec::new(),
                emergency_backup: None,
                outcome: RecoveryOutcome::Healthy,
            };
        }

        let sources = self.find_recovery_sources();
        if sources.is_empty() {
            tracing::warn!(missing = missing.len(), "no recovery sources found");
            return RecoveryRun {
                missing,
                sources,
                emergency_backup: None,
                outcome: RecoveryOutcome::NoSources,
            };
        }

        // A failed emergency backup is already in the safety log; carry on
        let emergency_backup = self.create_emergency_backup().ok();

        let targets: Vec<String> = missing.iter().map(|m| m.path.clone()).collect();
        let result = self.recover_from_sources(&sources, &targets);

        let details = format!("Recovered: {:?}, Failed: {:?}", result.recovered, result.failed);
        if let Err(e) = self.recovery_log.log("interactive_recovery", &details) {
            tracing::warn!(error = %e, "failed to write recovery log");
        }

        RecoveryRun {
            missing,
            sources,
            emergency_backup,
            outcome: RecoveryOutcome::Completed(result),
        }
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn recovery_log(&self) -> &RecoveryLog {
        &self.recovery_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{SafetyLog, DEFAULT_LIMIT};
    use crate::config::{CriticalFileSet, ProjectPaths};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_engine() -> (RecoveryEngine, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProjectPaths::with_root(temp_dir.path().to_path_buf());
        let critical = CriticalFileSet::from_pairs([
            ("README.md", "Project documentation"),
            ("src/", "Directory with source files"),
        ]);
        let safety_log = SafetyLog::new(paths.safety_log(), DEFAULT_LIMIT);
        let recovery_log = RecoveryLog::new(paths.recovery_log());
        let backups = BackupManager::new(paths, critical, safety_log);

        (RecoveryEngine::new(backups, recovery_log), temp_dir)
    }

    fn write_project(root: &Path) {
        fs::write(root.join("README.md"), "# Project").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src").join("main.cpp"), "int main() {}").unwrap();
    }

    #[test]
    fn test_scan_reports_missing_with_description() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        fs::remove_file(temp.path().join("README.md")).unwrap();

        let missing = engine.scan_for_missing_files();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].path, "README.md");
        assert_eq!(missing[0].description, "Project documentation");
    }

    #[test]
    fn test_recover_missing_readme_from_backup() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        let backup = engine.backups().create_backup("b1").unwrap();
        fs::remove_file(temp.path().join("README.md")).unwrap();

        let sources = engine.find_recovery_sources();
        assert_eq!(sources[0].kind, SourceKind::Backup);
        assert_eq!(sources[0].path, backup);

        let backup_only = vec![RecoverySource::backup(backup)];
        let result = engine.recover_from_sources(&backup_only, &["README.md".to_string()]);

        assert_eq!(result.recovered, vec!["README.md"]);
        assert!(result.failed.is_empty());
        assert!(temp.path().join("README.md").exists());
    }

    #[test]
    fn test_recovery_is_additive_and_idempotent() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        engine.backups().create_backup("b1").unwrap();

        fs::write(temp.path().join("README.md"), "edited locally").unwrap();
        fs::remove_dir_all(temp.path().join("src")).unwrap();

        let targets = engine.backups().critical_files().paths();
        let sources = engine.find_recovery_sources();

        let first = engine.recover_from_sources(&sources, &targets);
        assert_eq!(first.recovered, vec!["src/"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "edited locally"
        );

        let second = engine.recover_from_sources(&sources, &targets);
        assert!(second.recovered.is_empty());
        assert!(second.failed.is_empty());
    }

    #[test]
    fn test_non_backup_sources_are_not_consulted() {
        let (engine, temp) = create_test_engine();
        fs::create_dir_all(temp.path().join("elsewhere")).unwrap();
        fs::write(temp.path().join("elsewhere").join("README.md"), "loose").unwrap();

        let sources = vec![RecoverySource::project(temp.path().join("elsewhere"))];
        let result = engine.recover_from_sources(&sources, &["README.md".to_string()]);

        assert!(result.recovered.is_empty());
        assert_eq!(result.failed, vec!["README.md"]);
    }

    #[test]
    fn test_later_backup_used_when_first_lacks_file() {
        let (engine, temp) = create_test_engine();
        let empty = temp.path().join("backups").join("empty");
        let full = temp.path().join("backups").join("full");
        fs::create_dir_all(&empty).unwrap();
        fs::create_dir_all(&full).unwrap();
        fs::write(full.join("README.md"), "from full").unwrap();

        let sources = vec![RecoverySource::backup(empty), RecoverySource::backup(full)];
        let result = engine.recover_from_sources(&sources, &["README.md".to_string()]);

        assert_eq!(result.recovered, vec!["README.md"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "from full"
        );
    }

    #[test]
    fn test_recover_from_backup_overwrites() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        let backup = engine.backups().create_backup("b1").unwrap();
        fs::write(temp.path().join("README.md"), "broken").unwrap();

        let result = engine.recover_from_backup(
            &backup,
            &["README.md".to_string(), "makefile".to_string()],
        );

        assert_eq!(result.recovered, vec!["README.md"]);
        assert_eq!(result.failed, vec!["makefile"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "# Project"
        );
    }

    #[test]
    fn test_recover_named_backup_selected_targets() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        let backup = engine.backups().create_backup("b1").unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().to_string();

        fs::write(temp.path().join("README.md"), "broken").unwrap();
        fs::write(temp.path().join("src").join("main.cpp"), "edited").unwrap();

        let run = engine
            .recover_named_backup(&name, &["README.md".to_string()])
            .unwrap();

        assert_eq!(run.backup, name);
        assert_eq!(run.result.recovered, vec!["README.md"]);
        assert!(run.emergency_backup.is_some());
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "# Project"
        );
        // Untargeted paths keep their live content
        assert_eq!(
            fs::read_to_string(temp.path().join("src").join("main.cpp")).unwrap(),
            "edited"
        );

        let lines = engine.recovery_log().read_lines().unwrap();
        assert!(lines[0].contains("recover_from_backup: "));
        assert!(lines[0].contains("Recovered: [\"README.md\"], Failed: []"));
    }

    #[test]
    fn test_recover_named_backup_defaults_to_all_paths() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        let backup = engine.backups().create_backup("b1").unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().to_string();
        fs::remove_dir_all(temp.path().join("src")).unwrap();

        let run = engine.recover_named_backup(&name, &[]).unwrap();

        assert_eq!(run.result.recovered, vec!["README.md", "src/"]);
        assert!(temp.path().join("src").join("main.cpp").exists());
    }

    #[test]
    fn test_recover_named_backup_rejects_unknown() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        let backup = engine.backups().create_backup("b1").unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().to_string();

        let err = engine.recover_named_backup("backup_missing", &[]).unwrap_err();
        assert!(err.is_not_found());

        let err = engine
            .recover_named_backup(&name, &["../etc/passwd".to_string()])
            .unwrap_err();
        assert!(matches!(err, SafekeepError::Config(_)));
        assert!(!temp.path().join("recovery_log.txt").exists());
    }

    #[test]
    fn test_emergency_backup_is_ordinary_snapshot() {
        let (engine, temp) = create_test_engine();
        fs::write(temp.path().join("README.md"), "# Project").unwrap();

        let path = engine.create_emergency_backup().unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("emergency_backup_"));
        assert!(path.join("README.md").exists());
        assert!(!path.join("src").exists());

        let listed = engine.backups().list_backups().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reason, "emergency");
    }

    #[test]
    fn test_interactive_recovery_healthy() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());

        let run = engine.interactive_recovery();
        assert_eq!(run.outcome, RecoveryOutcome::Healthy);
        assert!(!temp.path().join("backups").exists());
    }

    #[test]
    fn test_interactive_recovery_no_sources() {
        let (engine, temp) = create_test_engine();
        fs::write(temp.path().join("README.md"), "# Project").unwrap();

        assert!(engine.find_recovery_sources().is_empty());

        let run = engine.interactive_recovery();
        assert_eq!(run.outcome, RecoveryOutcome::NoSources);
        assert!(run.emergency_backup.is_none());
        assert!(!temp.path().join("backups").exists());
        assert!(!temp.path().join("recovery_log.txt").exists());
    }

    #[test]
    fn test_interactive_recovery_completed() {
        let (engine, temp) = create_test_engine();
        write_project(temp.path());
        engine.backups().create_backup("b1").unwrap();
        fs::remove_file(temp.path().join("README.md")).unwrap();

        let run = engine.interactive_recovery();

        match &run.outcome {
            RecoveryOutcome::Completed(result) => {
                assert_eq!(result.recovered, vec!["README.md"]);
                assert!(result.is_complete());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(run.emergency_backup.is_some());
        assert!(temp.path().join("README.md").exists());

        let lines = engine.recovery_log().read_lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("interactive_recovery: Recovered: [\"README.md\"], Failed: []"));
    }
}
