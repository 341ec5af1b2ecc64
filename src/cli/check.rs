//! The `check` command
//!
//! Runs the routine safety check and reports what it found. `scan` is the
//! read-only integrity half of it.

use crate::backup::{run_safety_check, CheckOutcome};
use crate::config::{ProjectPaths, Settings};
use crate::display::{format_backup_list, format_integrity_report, format_title};

use super::{backup_manager, ExitStatus};

/// Handle `safekeep check`
pub fn handle_check(paths: &ProjectPaths, settings: &Settings) -> ExitStatus {
    let manager = backup_manager(paths, settings);

    println!("{}", format_title("SafeKeep Backup and Safety Check"));

    let run = run_safety_check(&manager, settings.backup_list_display);

    println!("{}", format_integrity_report(&run.integrity));

    let status = match &run.outcome {
        CheckOutcome::Healthy => ExitStatus::Success,
        CheckOutcome::Restored(name) => {
            println!();
            println!("Restored from latest backup: {}", name);
            ExitStatus::Success
        }
        CheckOutcome::RestoreFailed(name) => {
            println!();
            println!("Restore from latest backup failed: {}", name);
            ExitStatus::Degraded
        }
        CheckOutcome::NoBackups => {
            println!();
            println!("No backups available for restoration");
            ExitStatus::Unrecoverable
        }
    };

    if !run.recent_backups.is_empty() {
        println!();
        println!("Available backups ({}):", run.backup_count);
        print!("{}", format_backup_list(&run.recent_backups));
    }

    println!();
    match &run.new_backup {
        Some(path) => println!("New backup created: {}", path.display()),
        None => println!("Creating new backup failed (see safety_log.json)"),
    }

    status
}

/// Handle `safekeep scan`: report integrity without changing anything
pub fn handle_scan(paths: &ProjectPaths, settings: &Settings) -> ExitStatus {
    let manager = backup_manager(paths, settings);
    let report = manager.check_file_integrity();

    println!("{}", format_integrity_report(&report));

    if report.is_healthy() {
        ExitStatus::Success
    } else {
        ExitStatus::Degraded
    }
}
