//! Configuration management for docmig.
//!
//! Parses `docmig.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config
//! file, `./docs` is migrated and backed up to `./docs_backup`.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `backup.dir`

mod expand;

use docmig_fs::{absolutize, is_within};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override backup directory.
    pub backup_dir: Option<PathBuf>,
    /// Override backup enabled flag.
    pub backup_enabled: Option<bool>,
    /// Override parallel processing flag.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmig.toml";

/// Default docs directory, relative to the config directory.
const DEFAULT_SOURCE_DIR: &str = "docs";

/// Suffix appended to the source directory name for the default backup.
const BACKUP_SUFFIX: &str = "_backup";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Backup configuration (paths are relative strings from TOML).
    backup: BackupConfigRaw,
    /// Batch processing configuration.
    pub migrate: MigrateConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved backup configuration (set after loading).
    #[serde(skip)]
    pub backup_resolved: BackupConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    extensions: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory whose files are migrated in place.
    pub source_dir: PathBuf,
    /// Lowercase file extensions (without dot) that are converted.
    pub extensions: Vec<String>,
}

/// Raw backup configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BackupConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
}

/// Resolved backup configuration.
#[derive(Debug, Default)]
pub struct BackupConfig {
    /// Whether the source tree is copied before migration.
    pub enabled: bool,
    /// Backup destination directory.
    pub dir: PathBuf,
}

/// Batch processing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Convert files on the rayon thread pool instead of one by one.
    pub parallel: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`backup.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Default file extensions converted when none are configured.
fn default_extensions() -> Vec<String> {
    vec!["md".to_owned(), "mdx".to_owned()]
}

/// Default backup location: a sibling of the source named `<source>_backup`.
///
/// `docs` becomes `docs_backup`, `site/docs` becomes `site/docs_backup`.
/// Pass an absolute source: a bare `.` has no name or parent to build from.
#[must_use]
pub fn default_backup_dir(source_dir: &Path) -> PathBuf {
    let name = source_dir
        .file_name()
        .map_or_else(|| DEFAULT_SOURCE_DIR.into(), |n| n.to_string_lossy());
    let parent = source_dir.parent().unwrap_or(Path::new("."));
    parent.join(format!("{name}{BACKUP_SUFFIX}"))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docmig.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(&absolutize(path, &cwd))?
        } else if let Some(discovered) = Self::discover_config(&cwd) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_base(&cwd)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings, &cwd);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// CLI paths are relative to `cwd`. Overriding the source directory also
    /// moves the default backup directory, unless a backup directory was
    /// configured explicitly.
    fn apply_cli_settings(&mut self, settings: &CliSettings, cwd: &Path) {
        if let Some(source_dir) = &settings.source_dir {
            let source_dir = absolutize(source_dir, cwd);
            if self.backup.dir.is_none() {
                self.backup_resolved.dir = default_backup_dir(&source_dir);
            }
            self.docs_resolved.source_dir = source_dir;
        }
        if let Some(backup_dir) = &settings.backup_dir {
            self.backup_resolved.dir = absolutize(backup_dir, cwd);
        }
        if let Some(enabled) = settings.backup_enabled {
            self.backup_resolved.enabled = enabled;
        }
        if let Some(parallel) = settings.parallel {
            self.migrate.parallel = parallel;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join(DEFAULT_SOURCE_DIR);
        Self {
            docs: DocsConfigRaw::default(),
            backup: BackupConfigRaw::default(),
            migrate: MigrateConfig::default(),
            backup_resolved: BackupConfig {
                enabled: true,
                dir: default_backup_dir(&source_dir),
            },
            docs_resolved: DocsConfig {
                source_dir,
                extensions: default_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_extensions()?;
        self.validate_backup()?;
        Ok(())
    }

    /// Validate the list of converted file extensions.
    fn validate_extensions(&self) -> Result<(), ConfigError> {
        let extensions = &self.docs_resolved.extensions;
        if extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in extensions {
            if ext.is_empty() {
                return Err(ConfigError::Validation(
                    "docs.extensions cannot contain empty entries".to_owned(),
                ));
            }
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "docs.extensions entry \"{ext}\" must not start with a dot"
                )));
            }
        }
        Ok(())
    }

    /// The backup must live outside the tree it copies.
    ///
    /// Compared on resolved paths, so `.` and `..` components or a symlinked
    /// parent cannot hide the nesting.
    fn validate_backup(&self) -> Result<(), ConfigError> {
        if !self.backup_resolved.enabled {
            return Ok(());
        }
        if is_within(&self.backup_resolved.dir, &self.docs_resolved.source_dir) {
            return Err(ConfigError::Validation(format!(
                "backup.dir ({}) cannot be inside docs.source_dir ({})",
                self.backup_resolved.dir.display(),
                self.docs_resolved.source_dir.display()
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configured paths.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.backup.dir {
            self.backup.dir = Some(expand::expand_env(dir, "backup.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = absolutize(
            Path::new(self.docs.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)),
            config_dir,
        );
        let extensions = self.docs.extensions.as_ref().map_or_else(default_extensions, |exts| {
            exts.iter().map(|e| e.trim().to_lowercase()).collect()
        });
        let backup_dir = self
            .backup
            .dir
            .as_deref()
            .map_or_else(
                || default_backup_dir(&source_dir),
                |d| absolutize(Path::new(d), config_dir),
            );

        self.backup_resolved = BackupConfig {
            enabled: self.backup.enabled.unwrap_or(true),
            dir: backup_dir,
        };
        self.docs_resolved = DocsConfig {
            source_dir,
            extensions,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.extensions, vec!["md", "mdx"]);
        assert!(config.backup_resolved.enabled);
        assert_eq!(
            config.backup_resolved.dir,
            PathBuf::from("/test/docs_backup")
        );
        assert!(config.migrate.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_backup_dir() {
        assert_eq!(
            default_backup_dir(Path::new("/site/docs")),
            PathBuf::from("/site/docs_backup")
        );
        assert_eq!(
            default_backup_dir(Path::new("content")),
            PathBuf::from("content_backup")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/docs")
        );
        assert_eq!(
            config.backup_resolved.dir,
            PathBuf::from("/project/docs_backup")
        );
        assert!(config.backup_resolved.enabled);
        assert!(config.migrate.parallel);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "site/content"
extensions = ["MD", " mdx "]

[backup]
enabled = false
dir = "../archive"

[migrate]
parallel = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/site/content")
        );
        assert_eq!(config.docs_resolved.extensions, vec!["md", "mdx"]);
        assert!(!config.backup_resolved.enabled);
        assert_eq!(config.backup_resolved.dir, PathBuf::from("/archive"));
        assert!(!config.migrate.parallel);
    }

    #[test]
    fn test_default_backup_follows_configured_source() {
        let toml = r#"
[docs]
source_dir = "site/content"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.backup_resolved.dir,
            PathBuf::from("/project/site/content_backup")
        );
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[migrate]\nparallel = \"yes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_source_dir_moves_default_backup() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/pages")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, Path::new("/cwd"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/pages")
        );
        assert_eq!(
            config.backup_resolved.dir,
            PathBuf::from("/custom/pages_backup")
        );
    }

    #[test]
    fn test_apply_cli_settings_keeps_explicit_backup() {
        let toml = r#"
[backup]
dir = "saved"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/other/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, Path::new("/cwd"));

        assert_eq!(config.backup_resolved.dir, PathBuf::from("/project/saved"));
    }

    #[test]
    fn test_apply_cli_settings_flags() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            backup_dir: Some(PathBuf::from("/backups/docs")),
            backup_enabled: Some(false),
            parallel: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, Path::new("/cwd"));

        assert_eq!(config.backup_resolved.dir, PathBuf::from("/backups/docs"));
        assert!(!config.backup_resolved.enabled);
        assert!(!config.migrate.parallel);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_relative_paths_use_cwd() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("./site/docs")),
            backup_dir: Some(PathBuf::from("../archive")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, Path::new("/work/repo"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/work/repo/site/docs")
        );
        assert_eq!(config.backup_resolved.dir, PathBuf::from("/work/archive"));
    }

    #[test]
    fn test_cli_source_dot_backs_up_next_to_cwd() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path().join("site");
        std::fs::create_dir_all(&cwd).unwrap();
        let mut config = Config::default_with_base(&cwd);
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from(".")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, &cwd);

        assert_eq!(config.docs_resolved.source_dir, cwd);
        assert_eq!(config.backup_resolved.dir, temp.path().join("site_backup"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_backup_dir_inside_source_rejected() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("docs")).unwrap();
        let mut config = Config::default_with_base(temp.path());
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("docs")),
            backup_dir: Some(PathBuf::from("./docs/bk")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides, temp.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err:?}");
    }

    #[test]
    fn test_validate_backup_inside_source_via_parent_components() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backup_resolved.dir = PathBuf::from("/test/other/../docs/./bk");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_config(&nested),
            Some(temp.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_validate_empty_extensions() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.extensions.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.extensions"));
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.extensions = vec![".md".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not start with a dot"));
    }

    #[test]
    fn test_validate_backup_inside_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backup_resolved.dir = PathBuf::from("/test/docs/backup");
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("backup.dir"));
    }

    #[test]
    fn test_validate_backup_inside_source_ignored_when_disabled() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backup_resolved.dir = PathBuf::from("/test/docs");
        config.backup_resolved.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs]\nsource_dir = \"pages\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(
            config.backup_resolved.dir,
            dir.path().join("pages_backup")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/docmig.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            backup_dir: Some(dir.path().join("docs/inner")),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
