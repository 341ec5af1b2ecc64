//! SafeKeep - snapshot, integrity check and recovery for critical project files
//!
//! This library protects a fixed set of critical paths in a project tree. It
//! takes manifest-described snapshots, checks that every critical path exists
//! and is non-empty, and recovers missing paths from the best available
//! backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Project paths, settings and the critical file set
//! - `error`: Custom error types
//! - `storage`: Atomic JSON writes and file/tree copying
//! - `audit`: The capped JSON safety log and the text recovery log
//! - `backup`: Snapshot creation, listing, restore and integrity checks
//! - `recovery`: Recovery source discovery and the recovery workflow
//! - `display`: Plain-text formatting for terminal output
//! - `cli`: Command handlers and process exit statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use safekeep::config::{ProjectPaths, Settings};
//!
//! let paths = ProjectPaths::new()?;
//! let settings = Settings::load_or_default(&paths)?;
//! let engine = safekeep::cli::recovery_engine(&paths, &settings);
//! let run = engine.interactive_recovery();
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod recovery;
pub mod storage;

pub use error::{SafekeepError, SafekeepResult};
