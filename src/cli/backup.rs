//! Backup CLI commands
//!
//! Implements CLI commands for creating, listing, inspecting and restoring
//! individual backups.

use clap::Subcommand;

use crate::backup::{read_manifest, BackupManager};
use crate::config::{ProjectPaths, Settings};
use crate::display::{format_backup_list, format_title};
use crate::error::{SafekeepError, SafekeepResult};

use super::{backup_manager, ExitStatus};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create {
        /// Reason tag recorded in the backup name and manifest
        #[arg(short, long, default_value = "manual")]
        reason: String,
    },

    /// List all backups with a manifest, newest first
    List,

    /// Restore from a backup
    Restore {
        /// Backup name (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the manifest of a backup
    Info {
        /// Backup name (use 'latest' for most recent)
        backup: String,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &ProjectPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> SafekeepResult<ExitStatus> {
    let manager = backup_manager(paths, settings);

    match cmd {
        BackupCommands::Create { reason } => {
            println!("Creating backup...");
            let backup_path = manager.create_backup(&reason)?;
            println!("Backup created: {}", backup_path.display());
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: safekeep backup create");
                return Ok(ExitStatus::Success);
            }

            println!("{}", format_title("Available Backups"));
            print!("{}", format_backup_list(&backups));
            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let name = resolve_backup_name(&manager, &backup)?;

            if !force {
                println!("Backup: {}", name);
                println!("WARNING: This will overwrite the critical files in the project!");
                println!("To proceed, run again with --force flag:");
                println!("  safekeep backup restore {} --force", backup);
                return Ok(ExitStatus::Success);
            }

            println!("Creating backup of current state before restore...");
            match manager.auto_backup_before("restore") {
                Ok(path) => println!("Pre-restore backup saved: {}", path.display()),
                Err(e) => println!("Pre-restore backup failed: {}", e),
            }

            println!("Restoring from backup {}...", name);
            manager.restore_from_backup(&name)?;
            println!("Restore complete!");
        }

        BackupCommands::Info { backup } => {
            let name = resolve_backup_name(&manager, &backup)?;
            let manifest = read_manifest(&paths.backup_dir().join(&name))?;

            println!("{}", format_title("Backup Details"));
            println!("Name:      {}", name);
            println!("Timestamp: {}", manifest.timestamp);
            println!("Reason:    {}", manifest.reason);
            println!("Location:  {}", manifest.backup_path);
            println!();
            println!("Files:");
            for file in &manifest.files {
                println!("  {}", file);
            }
        }
    }

    Ok(ExitStatus::Success)
}

/// Resolve a backup identifier to a directory name under `backups/`
pub(crate) fn resolve_backup_name(manager: &BackupManager, backup: &str) -> SafekeepResult<String> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .latest_backup()?
            .map(|b| b.name)
            .ok_or_else(|| SafekeepError::backup_not_found("latest"));
    }

    if manager.paths().backup_dir().join(backup).is_dir() {
        return Ok(backup.to_string());
    }

    Err(SafekeepError::backup_not_found(backup))
}
