//! The `recover` command
//!
//! Runs the interactive recovery workflow and reports each step. With
//! `--from` it restores chosen paths from one named backup instead.

use crate::config::{ProjectPaths, Settings};
use crate::display::{format_file_statuses, format_recovery_result, format_sources, format_title};
use crate::error::SafekeepResult;
use crate::recovery::{RecoveryOutcome, RecoveryResult};

use super::backup::resolve_backup_name;
use super::{recovery_engine, ExitStatus};

/// Handle `safekeep recover`
pub fn handle_recover(paths: &ProjectPaths, settings: &Settings) -> ExitStatus {
    let engine = recovery_engine(paths, settings);

    println!("{}", format_title("SafeKeep File Recovery"));
    println!("Scanning for missing files...");
    print!("{}", format_file_statuses(&engine.file_statuses()));

    let run = engine.interactive_recovery();

    match &run.outcome {
        RecoveryOutcome::Healthy => {
            println!();
            println!("All critical files are present!");
        }
        RecoveryOutcome::NoSources => {
            println!();
            println!("Found {} missing files", run.missing.len());
            println!("No recovery sources found!");
            println!("Try taking a backup first: safekeep backup create");
        }
        RecoveryOutcome::Completed(result) => {
            println!();
            println!("Found {} missing files", run.missing.len());
            println!();
            println!("Found {} potential recovery sources:", run.sources.len());
            print!("{}", format_sources(&run.sources));
            println!();
            match &run.emergency_backup {
                Some(path) => println!("Emergency backup created: {}", path.display()),
                None => println!("Emergency backup failed (see safety_log.json)"),
            }
            println!();
            print!("{}", format_recovery_result(result));
        }
    }

    ExitStatus::from(&run.outcome)
}

/// Handle `safekeep recover --from <backup> [PATH...]`
pub fn handle_recover_from(
    paths: &ProjectPaths,
    settings: &Settings,
    backup: &str,
    targets: &[String],
) -> SafekeepResult<ExitStatus> {
    let engine = recovery_engine(paths, settings);
    let name = resolve_backup_name(engine.backups(), backup)?;

    println!("{}", format_title("SafeKeep Targeted Recovery"));
    println!("Recovering from backup: {}", name);

    let run = engine.recover_named_backup(&name, targets)?;

    match &run.emergency_backup {
        Some(path) => println!("Emergency backup created: {}", path.display()),
        None => println!("Emergency backup failed (see safety_log.json)"),
    }
    println!();
    print!("{}", format_recovery_result(&run.result));

    Ok(targeted_status(&run.result))
}

fn targeted_status(result: &RecoveryResult) -> ExitStatus {
    if result.is_complete() {
        ExitStatus::Success
    } else if result.recovered.is_empty() {
        ExitStatus::Unrecoverable
    } else {
        ExitStatus::Degraded
    }
}
