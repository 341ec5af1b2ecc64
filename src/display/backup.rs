//! Backup and integrity display formatting

use crate::backup::{BackupSummary, IntegrityReport};

/// Format a list of backups as a table, newest first
pub fn format_backup_list(backups: &[BackupSummary]) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let name_width = backups
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<15}  {}\n",
        "Name",
        "Timestamp",
        "Reason",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<15}  {:-<12}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for backup in backups {
        output.push_str(&format!(
            "{:<name_width$}  {:<15}  {}\n",
            backup.name,
            backup.timestamp,
            backup.reason,
            name_width = name_width,
        ));
    }

    output
}

/// Format an integrity report
pub fn format_integrity_report(report: &IntegrityReport) -> String {
    if report.is_healthy() {
        return "All critical files are intact".to_string();
    }

    let mut output = String::from("File integrity issues detected:\n");
    if !report.missing.is_empty() {
        output.push_str(&format!("  Missing files:   {}\n", report.missing.join(", ")));
    }
    if !report.corrupted.is_empty() {
        output.push_str(&format!("  Corrupted files: {}\n", report.corrupted.join(", ")));
    }
    output
}
