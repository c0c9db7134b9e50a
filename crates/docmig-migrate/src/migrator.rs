//! Batch migration of a docs tree.
//!
//! Each file is an independent unit: a read, convert or write failure is
//! logged and recorded in that file's [`FileReport`], and the run moves on.
//! Only a missing source directory or a failed backup stops a run, both
//! before any file is touched.

use std::path::{Path, PathBuf};
use std::time::Instant;

use docmig_config::Config;
use docmig_convert::convert;
use docmig_fs::{BackupError, ReadError, Scanner, create_backup, read_text};
use rayon::prelude::*;

use crate::summary::{FileOutcome, FileReport, RunSummary, SkipReason};

/// Options for a migration run.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Directory whose documents are rewritten in place.
    pub source_dir: PathBuf,
    /// Lowercase extensions (without dot) of files to convert.
    pub extensions: Vec<String>,
    /// Where to back up the source tree first. `None` disables the backup.
    pub backup_dir: Option<PathBuf>,
    /// Convert files on the rayon thread pool.
    pub parallel: bool,
    /// Convert without writing anything, backup included.
    pub dry_run: bool,
}

impl MigrateOptions {
    /// Build options from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_dir: config.docs_resolved.source_dir.clone(),
            extensions: config.docs_resolved.extensions.clone(),
            backup_dir: config
                .backup_resolved
                .enabled
                .then(|| config.backup_resolved.dir.clone()),
            parallel: config.migrate.parallel,
            dry_run: false,
        }
    }

    /// Set the dry run flag.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Error that aborts a migration run.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The source directory does not exist.
    #[error("Docs directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The backup could not be created.
    #[error("Backup failed: {0}")]
    Backup(#[from] BackupError),
}

/// Migrates every document under a source directory.
pub struct Migrator {
    options: MigrateOptions,
}

impl Migrator {
    /// Create a new migrator with the given options.
    #[must_use]
    pub fn new(options: MigrateOptions) -> Self {
        Self { options }
    }

    /// Run the migration.
    ///
    /// Backs up the source tree (unless disabled or dry run), then converts
    /// every discovered document.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or the backup
    /// fails. Per-file failures are reported in the summary instead.
    pub fn run(&self) -> Result<RunSummary, MigrateError> {
        let start = Instant::now();
        let source_dir = &self.options.source_dir;
        if !source_dir.is_dir() {
            return Err(MigrateError::SourceNotFound(source_dir.clone()));
        }

        let backup = match &self.options.backup_dir {
            Some(dir) if !self.options.dry_run => Some(create_backup(source_dir, dir)?),
            _ => None,
        };

        let files = Scanner::new(source_dir.clone(), &self.options.extensions).scan();
        tracing::info!(count = files.len(), source = %source_dir.display(), "Discovered documents");

        let reports: Vec<FileReport> = if self.options.parallel {
            files.par_iter().map(|path| self.process_file(path)).collect()
        } else {
            files.iter().map(|path| self.process_file(path)).collect()
        };

        Ok(RunSummary {
            backup,
            reports,
            dry_run: self.options.dry_run,
            elapsed: start.elapsed(),
        })
    }

    /// Convert one file, turning every failure into an outcome.
    fn process_file(&self, path: &Path) -> FileReport {
        let file = match read_text(path) {
            Ok(file) => file,
            Err(ReadError::Binary) => {
                tracing::info!(path = %path.display(), "Skipping binary file");
                return FileReport::new(path.to_path_buf(), FileOutcome::Skipped(SkipReason::Binary));
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read file");
                return FileReport::new(path.to_path_buf(), FileOutcome::Failed(e.to_string()));
            }
        };

        let conversion = convert(&file.content);
        for warning in &conversion.warnings {
            tracing::warn!(path = %path.display(), warning = %warning, "Frontmatter left unchanged");
        }

        let outcome = if !conversion.changed {
            tracing::debug!(path = %path.display(), "Already converted");
            FileOutcome::Unchanged
        } else if self.options.dry_run {
            tracing::info!(path = %path.display(), "Would convert file");
            FileOutcome::Converted
        } else {
            match file.with_content(conversion.content).write(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Converted file");
                    FileOutcome::Converted
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to write file");
                    FileOutcome::Failed(format!("write failed: {e}"))
                }
            }
        };

        FileReport::new(path.to_path_buf(), outcome).with_warnings(conversion.warnings)
    }
}
