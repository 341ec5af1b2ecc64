//! The set of critical project paths
//!
//! A `CriticalFileSet` is built once from settings and handed to every
//! component that needs it, so tests can substitute a smaller set.

use serde::{Deserialize, Serialize};

/// A single protected path with a human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Path relative to the project root; directories conventionally end in `/`
    pub path: String,
    /// What this path holds
    pub description: String,
}

impl CriticalPath {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }

    /// Path with any trailing separator removed, suitable for `Path::join`
    pub fn relative(&self) -> &str {
        self.path.trim_end_matches('/')
    }
}

/// Ordered, immutable list of critical paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalFileSet {
    entries: Vec<CriticalPath>,
}

impl CriticalFileSet {
    /// Build a set from explicit entries, preserving their order
    pub fn new(entries: Vec<CriticalPath>) -> Self {
        Self { entries }
    }

    /// Build a set from `(path, description)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(path, description)| CriticalPath::new(path, description))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriticalPath> {
        self.entries.iter()
    }

    /// Paths in declaration order, as recorded in backup manifests
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Find the entry for a path, with or without its trailing `/`
    pub fn find(&self, path: &str) -> Option<&CriticalPath> {
        let wanted = path.trim_end_matches('/');
        self.entries.iter().find(|e| e.relative() == wanted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The default protected set for a C++ project tree
pub fn default_critical_paths() -> Vec<CriticalPath> {
    vec![
        CriticalPath::new("include/", "Directory with header files"),
        CriticalPath::new("src/", "Directory with source files"),
        CriticalPath::new("main.cpp", "Main program file"),
        CriticalPath::new("README.md", "Project documentation"),
        CriticalPath::new("build.sh", "Unix build script"),
        CriticalPath::new("compile.bat", "Windows build script"),
        CriticalPath::new("makefile", "Make configuration"),
    ]
}

impl Default for CriticalFileSet {
    fn default() -> Self {
        Self::new(default_critical_paths())
    }
}
