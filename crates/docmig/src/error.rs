//! CLI error types.

use docmig_config::ConfigError;
use docmig_migrate::MigrateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Migrate(#[from] MigrateError),
}
