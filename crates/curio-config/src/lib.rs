//! # curio-config
//!
//! Layered configuration loading for Curio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CURIO_*` prefix, `__` as separator)
//! 2. Project-level `curio.toml`
//! 3. User-level `~/.config/curio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CURIO_LINT__MIN_ITEMS_PER_TAG` -> `lint.min_items_per_tag`,
//! `CURIO_ENRICH__ONLY_MISSING` -> `enrich.only_missing`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use curio_config::CurioConfig;
//!
//! let config = CurioConfig::load_with_dotenv(Path::new(".")).expect("config");
//! println!("data lives in {}", config.source_directory.display());
//! ```

mod check_urls;
mod enrich;
mod error;
mod export;
mod import;
mod lint;

pub use check_urls::{CheckUrlsConfig, URL_KEYS};
pub use enrich::EnrichConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use import::ImportConfig;
pub use lint::LintConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the project-level configuration file.
pub const PROJECT_CONFIG_FILE: &str = "curio.toml";

/// A pipeline step that `curio run` can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Import,
    Enrich,
    CheckUrls,
    Lint,
    Export,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Enrich => "enrich",
            Self::CheckUrls => "check_urls",
            Self::Lint => "lint",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_source_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_steps() -> Vec<Step> {
    vec![Step::Lint]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurioConfig {
    /// Directory holding `software/`, `tags/`, `platforms/` and license lists,
    /// relative to the project root.
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,
    /// Steps executed in order by `curio run`.
    #[serde(default = "default_steps")]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub enrich: EnrichConfig,
    #[serde(default)]
    pub check_urls: CheckUrlsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for CurioConfig {
    fn default() -> Self {
        Self {
            source_directory: default_source_directory(),
            steps: default_steps(),
            lint: LintConfig::default(),
            import: ImportConfig::default(),
            enrich: EnrichConfig::default(),
            check_urls: CheckUrlsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl CurioConfig {
    /// Load configuration for the project rooted at `project_root`.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// validation.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` support.
    ///
    /// Loads `<project_root>/.env` (if present) before building the figment, so
    /// tokens referenced by `enrich.token_env` can live there.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CURIO_").split("__"))
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lint.validate()?;
        self.enrich.validate()?;
        self.check_urls.validate()?;
        if self.steps.is_empty() {
            return Err(ConfigError::invalid("steps", "at least one step is required"));
        }
        Ok(())
    }

    /// Source directory resolved against the project root.
    #[must_use]
    pub fn source_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source_directory)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("curio").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CurioConfig::default();
        assert_eq!(config.steps, vec![Step::Lint]);
        assert_eq!(config.source_directory, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn source_dir_joins_project_root() {
        let config = CurioConfig {
            source_directory: PathBuf::from("data"),
            ..CurioConfig::default()
        };
        assert_eq!(
            config.source_dir(Path::new("/srv/list")),
            PathBuf::from("/srv/list/data")
        );
    }

    #[test]
    fn empty_steps_are_rejected() {
        let config = CurioConfig {
            steps: Vec::new(),
            ..CurioConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
