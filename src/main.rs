use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use safekeep::cli::{
    handle_backup_command, handle_check, handle_recover, handle_recover_from, handle_scan,
    BackupCommands, ExitStatus,
};
use safekeep::config::{ProjectPaths, Settings};

#[derive(Parser)]
#[command(
    name = "safekeep",
    version,
    about = "Snapshot, integrity check and recovery for a project's critical files",
    long_about = "SafeKeep protects a fixed set of critical project files. It takes \
                  manifest-described snapshots under backups/, checks that every \
                  critical file exists and is non-empty, and recovers missing files \
                  from the best available backup."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check integrity, restore the latest backup if needed, then take a new backup
    Check,

    /// Recover missing critical files from backups
    Recover {
        /// Restore from this backup (name or "latest"), overwriting live files
        #[arg(long, value_name = "BACKUP")]
        from: Option<String>,

        /// Critical paths to restore with --from (default: all)
        #[arg(requires = "from")]
        paths: Vec<String>,
    },

    /// Report missing or empty critical files without changing anything
    Scan,

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show the project root and configured critical files
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("safekeep=warn")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitStatus::Error.into()
        }
    }
}

fn run(cli: Cli) -> Result<ExitStatus> {
    let paths = ProjectPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;

    let status = match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => handle_check(&paths, &settings),
        Commands::Recover { from: None, .. } => handle_recover(&paths, &settings),
        Commands::Recover {
            from: Some(backup),
            paths: targets,
        } => handle_recover_from(&paths, &settings, &backup, &targets)?,
        Commands::Scan => handle_scan(&paths, &settings),
        Commands::Backup(cmd) => handle_backup_command(&paths, &settings, cmd)?,
        Commands::Config => {
            println!("SafeKeep Configuration");
            println!("======================");
            println!("Project root:     {}", paths.root().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Safety log:       {}", paths.safety_log().display());
            println!("Recovery log:     {}", paths.recovery_log().display());
            println!();
            println!("Critical files:");
            for entry in &settings.critical_files {
                println!("  {:<15} {}", entry.path, entry.description);
            }
            ExitStatus::Success
        }
    };

    Ok(status)
}
