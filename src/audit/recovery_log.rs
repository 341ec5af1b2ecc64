//! Plain-text recovery log
//!
//! One line per recovery run, appended and never truncated:
//! `[<ISO timestamp>] <action>: <details>`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{SafekeepError, SafekeepResult};

use super::entry::now_iso;

/// Append-only text audit trail of recovery runs
#[derive(Debug, Clone)]
pub struct RecoveryLog {
    log_path: PathBuf,
}

impl RecoveryLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one line and flush it
    pub fn log(&self, action: &str, details: &str) -> SafekeepResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SafekeepError::Io(format!("Failed to open recovery log: {}", e)))?;

        writeln!(file, "[{}] {}: {}", now_iso(), action, details)
            .map_err(|e| SafekeepError::Io(format!("Failed to write recovery log: {}", e)))?;

        file.flush()
            .map_err(|e| SafekeepError::Io(format!("Failed to flush recovery log: {}", e)))?;

        Ok(())
    }

    /// Read all lines, oldest first
    pub fn read_lines(&self) -> SafekeepResult<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.log_path)
            .map_err(|e| SafekeepError::Io(format!("Failed to read recovery log: {}", e)))?;

        Ok(contents.lines().map(str::to_string).collect())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
