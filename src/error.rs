//! Custom error types for SafeKeep
//!
//! This module defines the error hierarchy for the backup and recovery
//! subsystem using thiserror for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for SafeKeep operations
#[derive(Error, Debug)]
pub enum SafekeepError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An expected source path does not exist
    #[error("Source missing: {0}")]
    SourceMissing(String),

    /// Copying a file or directory tree failed
    #[error("Failed to copy {path}: {reason}")]
    CopyFailure { path: String, reason: String },

    /// A backup manifest exists but cannot be parsed
    #[error("Manifest unreadable at {path}: {reason}")]
    ManifestUnreadable { path: String, reason: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SafekeepError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for manifests
    pub fn manifest_not_found(path: &Path) -> Self {
        Self::NotFound {
            entity_type: "Manifest",
            identifier: path.display().to_string(),
        }
    }

    /// Create a copy failure for the given path
    pub fn copy_failure(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::CopyFailure {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for SafekeepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for SafeKeep operations
pub type SafekeepResult<T> = Result<T, SafekeepError>;
