//! Display formatting for terminal output
//!
//! Formats backups, integrity reports and recovery runs as plain text.

pub mod backup;
pub mod recovery;

pub use backup::{format_backup_list, format_integrity_report};
pub use recovery::{format_file_statuses, format_recovery_result, format_sources};

/// Format a title underlined with `=` to its own width
pub fn format_title(title: &str) -> String {
    format!("{}\n{}", title, "=".repeat(title.len()))
}
