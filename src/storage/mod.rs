//! Storage layer for SafeKeep
//!
//! Provides atomic JSON writes, lenient JSON reads, and the file/tree copy
//! primitives used by backups and recovery.

pub mod copy;
pub mod file_io;

pub use copy::{copy_entry, copy_file_with_metadata, copy_tree, replace_tree};
pub use file_io::{read_json_or_default, write_json_atomic};
