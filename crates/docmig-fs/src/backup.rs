//! One-time backup of the source tree before it is rewritten.
//!
//! The tree is copied into a staging directory next to the destination and
//! renamed into place once every file is copied, so an interrupted copy never
//! leaves a backup that later runs would mistake for a complete one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::paths::is_within;

/// Outcome of a backup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    /// A new backup was written.
    Created {
        /// Number of files copied.
        files: usize,
    },
    /// The backup directory already existed and was left untouched.
    AlreadyExists,
}

/// Error creating a backup.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// The directory to back up does not exist.
    #[error("Directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The backup would be written into the tree being copied.
    #[error("Backup directory {} is inside {}", backup_dir.display(), source_dir.display())]
    InsideSource {
        /// Directory being backed up.
        source_dir: PathBuf,
        /// Requested backup directory.
        backup_dir: PathBuf,
    },
    /// Copying failed.
    #[error("Failed to back up {}: {source}", path.display())]
    Io {
        /// Path being copied or created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Walking the source tree failed.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl BackupError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Copy `source` to `backup` unless `backup` already exists.
///
/// Everything is copied, including hidden files. Symlinks to files are copied
/// as regular files; symlinks to directories are skipped.
///
/// # Errors
///
/// Returns an error if the source does not exist, the backup lies inside the
/// source, or any copy fails. A failed copy leaves no backup directory behind.
pub fn create_backup(source: &Path, backup: &Path) -> Result<BackupStatus, BackupError> {
    if !source.is_dir() {
        return Err(BackupError::SourceNotFound(source.to_path_buf()));
    }
    if is_within(backup, source) {
        return Err(BackupError::InsideSource {
            source_dir: source.to_path_buf(),
            backup_dir: backup.to_path_buf(),
        });
    }
    if backup.exists() {
        tracing::info!(path = %backup.display(), "Backup already exists, skipping");
        return Ok(BackupStatus::AlreadyExists);
    }

    let staging = staging_dir(backup);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(BackupError::io(&staging))?;
    }

    let files = match copy_tree(source, &staging) {
        Ok(files) => files,
        Err(e) => {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                tracing::warn!(path = %staging.display(), error = %cleanup, "Failed to remove partial backup");
            }
            return Err(e);
        }
    };

    fs::rename(&staging, backup).map_err(BackupError::io(backup))?;
    tracing::info!(path = %backup.display(), files, "Created backup");
    Ok(BackupStatus::Created { files })
}

/// Hidden sibling of the backup directory used while copying.
fn staging_dir(backup: &Path) -> PathBuf {
    let name = backup
        .file_name()
        .map_or_else(|| "backup".into(), |n| n.to_string_lossy());
    backup.with_file_name(format!(".{name}.partial"))
}

/// Copy a directory tree, returning the number of files copied.
fn copy_tree(source: &Path, destination: &Path) -> Result<usize, BackupError> {
    fs::create_dir_all(destination).map_err(BackupError::io(destination))?;

    let mut files = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(BackupError::io(&target))?;
        } else if file_type.is_file() || entry.path().is_file() {
            fs::copy(entry.path(), &target).map_err(BackupError::io(entry.path()))?;
            files += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-file entry in backup");
        }
    }
    Ok(files)
}
