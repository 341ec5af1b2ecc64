//! Configuration module for SafeKeep
//!
//! This module provides configuration management including:
//! - Project root and artifact path resolution
//! - The critical file set
//! - Optional settings persistence

pub mod critical;
pub mod paths;
pub mod settings;

pub use critical::{CriticalFileSet, CriticalPath};
pub use paths::ProjectPaths;
pub use settings::Settings;
