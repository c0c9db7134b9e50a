//! Per-file outcomes and the run summary built from them.

use std::path::PathBuf;
use std::time::Duration;

use docmig_fs::BackupStatus;

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file is not UTF-8 text.
    Binary,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was rewritten (or would be, in a dry run).
    Converted,
    /// Conversion produced identical content; nothing was written.
    Unchanged,
    /// The file was not processed.
    Skipped(SkipReason),
    /// Reading or writing the file failed.
    Failed(String),
}

/// Outcome of one file, with recovered problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path of the processed file.
    pub path: PathBuf,
    /// What happened to the file.
    pub outcome: FileOutcome,
    /// Problems recovered from while converting (e.g. unparsable frontmatter).
    pub warnings: Vec<String>,
}

impl FileReport {
    pub(crate) fn new(path: PathBuf, outcome: FileOutcome) -> Self {
        Self {
            path,
            outcome,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Result of a migration run.
#[derive(Debug)]
pub struct RunSummary {
    /// Backup result, `None` when no backup was requested.
    pub backup: Option<BackupStatus>,
    /// One report per discovered file, in path order.
    pub reports: Vec<FileReport>,
    /// Whether files were left unwritten.
    pub dry_run: bool,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.outcome)).count()
    }

    /// Number of files discovered.
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of files rewritten.
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted))
    }

    /// Number of files that needed no change.
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged))
    }

    /// Number of files skipped.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_)))
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    /// Files that failed, with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            FileOutcome::Failed(msg) => Some((&r.path, msg.as_str())),
            _ => None,
        })
    }

    /// Files with recovered problems, one item per warning.
    pub fn warnings(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.reports
            .iter()
            .flat_map(|r| r.warnings.iter().map(move |w| (&r.path, w.as_str())))
    }
}
