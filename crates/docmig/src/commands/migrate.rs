//! `docmig migrate` command implementation.

use std::path::PathBuf;

use clap::Args;
use docmig_config::{CliSettings, Config};
use docmig_migrate::{BackupStatus, MigrateOptions, Migrator, RunSummary};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the migrate command.
#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Docs directory to convert in place (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Backup directory (default: <source>_backup next to the source).
    #[arg(short, long, conflicts_with = "no_backup")]
    pub(crate) backup_dir: Option<PathBuf>,

    /// Skip the backup.
    #[arg(long)]
    pub(crate) no_backup: bool,

    /// Report what would change without writing anything.
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Convert files one at a time instead of in parallel.
    #[arg(long)]
    pub(crate) sequential: bool,

    /// Path to configuration file (default: auto-discover docmig.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Log each processed file.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl MigrateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            backup_dir: self.backup_dir,
            backup_enabled: self.no_backup.then_some(false),
            parallel: self.sequential.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");
        let options = MigrateOptions::from_config(&config).with_dry_run(self.dry_run);

        output.info(&format!("Source: {}", options.source_dir.display()));
        match &options.backup_dir {
            Some(dir) if !options.dry_run => {
                output.info(&format!("Backup: {}", dir.display()));
            }
            Some(_) => output.info("Backup: skipped (dry run)"),
            None => output.info("Backup: disabled"),
        }

        let summary = Migrator::new(options).run()?;
        print_summary(&output, &summary);
        Ok(())
    }
}

fn print_summary(output: &Output, summary: &RunSummary) {
    if summary.dry_run {
        output.highlight("\n[DRY RUN] No files written.");
    }

    match summary.backup {
        Some(BackupStatus::Created { files }) => {
            output.success(&format!("Backed up {files} files"));
        }
        Some(BackupStatus::AlreadyExists) => output.info("Backup already exists, left untouched"),
        None => {}
    }

    if summary.warnings().next().is_some() {
        output.warning("\nFrontmatter left unchanged:");
        for (path, warning) in summary.warnings() {
            output.detail(&format!("  {}: {warning}", path.display()));
        }
    }

    if summary.failed() > 0 {
        output.error(&format!("\nFailed ({}):", summary.failed()));
        for (path, message) in summary.failures() {
            output.detail(&format!("  {}: {message}", path.display()));
        }
    }

    let line = format!("\n{}", counts_line(summary));
    if summary.failed() > 0 {
        output.warning(&line);
    } else {
        output.success(&line);
    }
}

/// One-line count of outcomes.
fn counts_line(summary: &RunSummary) -> String {
    let verb = if summary.dry_run {
        "would convert"
    } else {
        "converted"
    };
    format!(
        "Processed {} files in {:.2}s: {} {verb}, {} unchanged, {} skipped, {} failed",
        summary.total(),
        summary.elapsed.as_secs_f64(),
        summary.converted(),
        summary.unchanged(),
        summary.skipped(),
        summary.failed(),
    )
}
