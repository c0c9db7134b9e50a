//! Batch migration of a Mintlify docs tree to Docusaurus-compatible Markdown.
//!
//! A [`Migrator`] backs up the source directory once, then converts every
//! discovered document in place. One bad file never stops the run; its
//! failure is recorded in the returned [`RunSummary`].

mod migrator;
mod summary;

pub use docmig_fs::BackupStatus;
pub use migrator::{MigrateError, MigrateOptions, Migrator};
pub use summary::{FileOutcome, FileReport, RunSummary, SkipReason};
