//! Recovery display formatting

use crate::recovery::{FileStatus, RecoveryResult, RecoverySource};

/// Format the presence of each critical path, present ones first
pub fn format_file_statuses(statuses: &[FileStatus]) -> String {
    let path_width = statuses
        .iter()
        .map(|s| s.path.len())
        .max()
        .unwrap_or(4)
        .max(15);

    let (present, missing): (Vec<_>, Vec<_>) = statuses.iter().partition(|s| s.present);

    let mut output = String::new();
    for status in present.into_iter().chain(missing) {
        let marker = if status.present { "present" } else { "MISSING" };
        output.push_str(&format!(
            "  [{:<7}] {:<path_width$} - {}\n",
            marker,
            status.path,
            status.description,
            path_width = path_width,
        ));
    }
    output
}

/// Format a numbered list of recovery sources
pub fn format_sources(sources: &[RecoverySource]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("  {}. {}: {}\n", i + 1, source.description, source.name()))
        .collect()
}

/// Format the counts and paths of a recovery result
pub fn format_recovery_result(result: &RecoveryResult) -> String {
    let mut output = String::from("Recovery Results:\n");
    output.push_str(&format!("  Recovered: {} files\n", result.recovered.len()));
    output.push_str(&format!("  Failed:    {} files\n", result.failed.len()));

    if !result.recovered.is_empty() {
        output.push_str(&format!(
            "\nSuccessfully recovered: {}\n",
            result.recovered.join(", ")
        ));
    }

    if !result.failed.is_empty() {
        output.push_str(&format!("\nCould not recover: {}\n", result.failed.join(", ")));
        output.push_str("\nManual recovery options:\n");
        output.push_str("  1. Check if files exist in other locations\n");
        output.push_str("  2. Restore from external backup\n");
        output.push_str("  3. Recreate files from scratch\n");
    }

    output
}
