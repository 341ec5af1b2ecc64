//! Backup manifests
//!
//! Every backup directory carries a `manifest.json` describing when and why
//! it was taken and which critical paths it was meant to hold.

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{SafekeepError, SafekeepResult};
use crate::storage::write_json_atomic;

/// File name of the manifest inside a backup directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Second-resolution timestamp used in backup names and manifests
///
/// The fixed `YYYYMMDD_HHMMSS` layout sorts lexicographically in time order.
pub fn backup_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Metadata written alongside each backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupManifest {
    /// When the backup was taken (`YYYYMMDD_HHMMSS`)
    #[serde(default = "unknown")]
    pub timestamp: String,

    /// Free-text tag explaining the backup
    #[serde(default = "unknown")]
    pub reason: String,

    /// Critical paths at creation time
    #[serde(default)]
    pub files: Vec<String>,

    /// Absolute path of the backup directory when it was written
    #[serde(default)]
    pub backup_path: String,
}

impl BackupManifest {
    pub fn new(
        timestamp: impl Into<String>,
        reason: impl Into<String>,
        files: Vec<String>,
        backup_path: &Path,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            reason: reason.into(),
            files,
            backup_path: backup_path.display().to_string(),
        }
    }
}

/// Write the manifest into `backup_root` atomically
pub fn write_manifest(backup_root: &Path, manifest: &BackupManifest) -> SafekeepResult<()> {
    write_json_atomic(backup_root.join(MANIFEST_FILE), manifest)
}

/// Read the manifest from `backup_root`
///
/// Returns `NotFound` when there is no manifest and `ManifestUnreadable`
/// when it cannot be parsed.
pub fn read_manifest(backup_root: &Path) -> SafekeepResult<BackupManifest> {
    let path = backup_root.join(MANIFEST_FILE);

    if !path.is_file() {
        return Err(SafekeepError::manifest_not_found(&path));
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| SafekeepError::ManifestUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| SafekeepError::ManifestUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
