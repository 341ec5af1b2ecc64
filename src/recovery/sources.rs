//! Recovery source discovery
//!
//! Sources are ranked by kind: backup directories first, then copies of
//! critical source files under `src/`, then any C/C++ source or header found
//! anywhere in the project tree.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::CriticalFileSet;

/// Extensions picked up by the project-wide scan, in ranking order
const PROJECT_SCAN_EXTENSIONS: [&str; 3] = ["cpp", "hpp", "h"];

/// Extensions of critical paths looked up under `src/`
const LOOSE_SOURCE_EXTENSIONS: [&str; 2] = [".cpp", ".hpp"];

/// Where a recovery source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A backup directory under `backups/`
    Backup,
    /// A critical file found under the `src/` tree
    Src,
    /// Any source or header file in the project
    Project,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Backup => write!(f, "backup"),
            SourceKind::Src => write!(f, "src"),
            SourceKind::Project => write!(f, "project"),
        }
    }
}

/// A candidate location to recover files from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoverySource {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub description: String,
}

impl RecoverySource {
    pub fn backup(path: PathBuf) -> Self {
        Self {
            kind: SourceKind::Backup,
            path,
            description: "Backup directory".to_string(),
        }
    }

    pub fn src(path: PathBuf) -> Self {
        Self {
            kind: SourceKind::Src,
            path,
            description: "Source directory".to_string(),
        }
    }

    pub fn project(path: PathBuf) -> Self {
        Self {
            kind: SourceKind::Project,
            path,
            description: "Project file".to_string(),
        }
    }

    /// Final path component, for display
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Critical `.cpp`/`.hpp` paths that also exist beneath `<root>/src/`
pub fn loose_source_candidates(root: &Path, critical: &CriticalFileSet) -> Vec<RecoverySource> {
    let src_dir = root.join("src");
    if !src_dir.is_dir() {
        return Vec::new();
    }

    critical
        .iter()
        .filter(|entry| {
            LOOSE_SOURCE_EXTENSIONS
                .iter()
                .any(|ext| entry.path.ends_with(ext))
        })
        .map(|entry| src_dir.join(entry.relative()))
        .filter(|candidate| candidate.exists())
        .map(RecoverySource::src)
        .collect()
}

/// Every `.cpp`, `.hpp` and `.h` file under `root`
///
/// Results are grouped by extension in that order, each group in walk order.
pub fn project_scan_candidates(root: &Path) -> Vec<RecoverySource> {
    let mut found: Vec<(usize, PathBuf)> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry during project scan");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let rank = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| PROJECT_SCAN_EXTENSIONS.iter().position(|e| *e == ext));

        if let Some(rank) = rank {
            found.push((rank, entry.into_path()));
        }
    }

    found.sort_by_key(|(rank, _)| *rank);
    found
        .into_iter()
        .map(|(_, path)| RecoverySource::project(path))
        .collect()
}
