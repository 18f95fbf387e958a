//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! vstamp has two configuration scopes:
//! - **Global**: User-level version defaults
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags and environment (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$VSTAMP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/vstamp/config.toml`
//! 3. `~/.vstamp/config.toml` (canonical write location)
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `.git/vstamp/config.toml` (canonical)
//! 2. `vstamp.toml` at the work tree root (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use vstamp::core::config::Config;
//! use vstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let result = Config::load(Some(&git.info().unwrap())).unwrap();
//! let config = result.config;
//!
//! println!("Abbreviation length: {}", config.abbrev_length());
//! println!("Template: {}", config.template());
//! ```

pub mod schema;

pub use schema::VersionDefaults;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::AbbrevLength;
use crate::git::RepoInfo;
use crate::version::{Template, VersionConfig};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo config overrides global
/// config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: VersionDefaults,
    /// Repository configuration (if in a repo)
    pub repo: Option<VersionDefaults>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(repo: Option<&RepoInfo>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match repo {
            Some(info) => Self::load_repo(info, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(VersionDefaults, Option<PathBuf>), ConfigError> {
        // 1. Check $VSTAMP_CONFIG
        if let Ok(path) = std::env::var("VSTAMP_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/vstamp/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("vstamp/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.vstamp/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".vstamp/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((VersionDefaults::default(), None))
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        info: &RepoInfo,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<VersionDefaults>, Option<PathBuf>), ConfigError> {
        // 1. Check .git/vstamp/config.toml (canonical)
        let canonical = Self::repo_config_path(&info.git_dir);
        if canonical.exists() {
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        // 2. Check vstamp.toml in the work tree (compatibility)
        let compat = info.work_dir.join("vstamp.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = Self::read_config(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<VersionDefaults, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.vstamp/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".vstamp/config.toml"))
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `vstamp/config.toml` inside the given `.git` directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("vstamp/config.toml")
    }

    /// Write global config atomically.
    pub fn write_global(config: &VersionDefaults) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write repo config atomically.
    ///
    /// Always writes the canonical location under the `.git` directory.
    pub fn write_repo(git_dir: &Path, config: &VersionDefaults) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::repo_config_path(git_dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically.
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Repo values layered over global values.
    pub fn merged(&self) -> VersionDefaults {
        match &self.repo {
            Some(repo) => repo.clone().or(&self.global),
            None => self.global.clone(),
        }
    }

    /// Get the abbreviation length.
    ///
    /// Defaults to 12 if not configured.
    pub fn abbrev_length(&self) -> AbbrevLength {
        self.merged()
            .abbrev_length
            .and_then(|len| AbbrevLength::new(len).ok())
            .unwrap_or_default()
    }

    /// Get the version prefix.
    ///
    /// Defaults to the empty string.
    pub fn prefix(&self) -> String {
        self.merged().prefix.unwrap_or_default()
    }

    /// Get the version template.
    ///
    /// Defaults to `{depth}.{hash}`.
    pub fn template(&self) -> Template {
        self.merged()
            .template
            .and_then(|t| Template::parse(&t).ok())
            .unwrap_or_default()
    }

    /// Check if a dirty working copy is tolerated.
    ///
    /// Defaults to `false`.
    pub fn allow_dirty(&self) -> bool {
        self.merged().allow_dirty.unwrap_or(false)
    }

    /// Check if hashes are sanitized.
    ///
    /// Defaults to `false`.
    pub fn sanitize(&self) -> bool {
        self.merged().sanitize.unwrap_or(false)
    }

    /// Build a [`VersionConfig`] for `root` from the configured defaults.
    pub fn version_config(&self, root: impl Into<PathBuf>) -> VersionConfig {
        VersionConfig::new(root)
            .with_abbrev_length(self.abbrev_length())
            .with_prefix(self.prefix())
            .with_template(self.template())
            .with_allow_dirty(self.allow_dirty())
            .with_sanitize(self.sanitize())
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
