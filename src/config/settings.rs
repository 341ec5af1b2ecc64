//! User settings for SafeKeep
//!
//! Settings live in an optional `safekeep.json` at the project root. Every
//! field is defaulted, so a partial file only overrides what it names.

use serde::Deserialize;

use super::critical::{default_critical_paths, CriticalFileSet, CriticalPath};
use super::paths::ProjectPaths;
use crate::error::SafekeepError;

/// Settings for SafeKeep
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Paths to protect, in display order
    #[serde(default = "default_critical_paths")]
    pub critical_files: Vec<CriticalPath>,

    /// Maximum number of entries kept in the safety log
    #[serde(default = "default_safety_log_limit")]
    pub safety_log_limit: usize,

    /// Number of backups shown by the safety check
    #[serde(default = "default_backup_list_display")]
    pub backup_list_display: usize,
}

fn default_safety_log_limit() -> usize {
    100
}

fn default_backup_list_display() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            critical_files: default_critical_paths(),
            safety_log_limit: default_safety_log_limit(),
            backup_list_display: default_backup_list_display(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &ProjectPaths) -> Result<Self, SafekeepError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SafekeepError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SafekeepError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Build the immutable critical file set these settings describe
    pub fn critical_file_set(&self) -> CriticalFileSet {
        CriticalFileSet::new(self.critical_files.clone())
    }
}
