//! Path management for SafeKeep
//!
//! Resolves the protected project root and every artifact SafeKeep keeps
//! beneath it.
//!
//! ## Path Resolution Order
//!
//! 1. `SAFEKEEP_PROJECT_DIR` environment variable (if set)
//! 2. The current working directory

use std::path::PathBuf;

use crate::error::SafekeepError;

/// Environment variable overriding the project root
pub const PROJECT_DIR_ENV: &str = "SAFEKEEP_PROJECT_DIR";

/// Manages all paths used by SafeKeep
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Root of the protected project
    root: PathBuf,
}

impl ProjectPaths {
    /// Create a new ProjectPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, SafekeepError> {
        let root = if let Ok(custom) = std::env::var(PROJECT_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            std::env::current_dir().map_err(|e| {
                SafekeepError::Config(format!("Could not determine current directory: {}", e))
            })?
        };

        Ok(Self { root })
    }

    /// Create ProjectPaths with a custom root (useful for testing)
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the project root
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Get the backup directory (<root>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.root.join("backups")
    }

    /// Get the path to the JSON safety log
    pub fn safety_log(&self) -> PathBuf {
        self.root.join("safety_log.json")
    }

    /// Get the path to the plain-text recovery log
    pub fn recovery_log(&self) -> PathBuf {
        self.root.join("recovery_log.txt")
    }

    /// Get the path to the optional settings file
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("safekeep.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProjectPaths::with_root(temp_dir.path().to_path_buf());

        assert_eq!(paths.root(), temp_dir.path());
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.safety_log(), temp_dir.path().join("safety_log.json"));
        assert_eq!(paths.recovery_log(), temp_dir.path().join("recovery_log.txt"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(PROJECT_DIR_ENV, custom_path);

        let paths = ProjectPaths::new().unwrap();
        assert_eq!(paths.root(), temp_dir.path());

        env::remove_var(PROJECT_DIR_ENV);
    }
}
