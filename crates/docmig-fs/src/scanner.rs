//! Document discovery by filesystem walking.
//!
//! The scanner only identifies files to convert. Reading and rewriting them is
//! left to the caller.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Discovers convertible documents under a source directory.
///
/// Hidden files and directories (names starting with `.`) are never returned
/// or descended into. Symlinks are not followed.
pub struct Scanner {
    source_dir: PathBuf,
    extensions: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `extensions` - File extensions to match, without dot, compared
    ///   case-insensitively (e.g. `["md", "mdx"]`)
    pub fn new(source_dir: PathBuf, extensions: &[String]) -> Self {
        Self {
            source_dir,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Root directory being scanned.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the filesystem and return matching document paths, sorted.
    ///
    /// Returns an empty Vec if the source directory doesn't exist. Entries
    /// that cannot be read are logged and skipped.
    pub fn scan(&self) -> Vec<PathBuf> {
        if !self.source_dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file() && self.matches_extension(e.path()))
            .map(DirEntry::into_path)
            .collect()
    }

    /// Check whether a path has one of the configured extensions.
    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

/// Hidden entries below the root. The root itself is always scanned.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
