//! TOML-based configuration for git-contributors.
//!
//! Every field is optional; an empty file is a valid configuration.
//!
//! ```toml
//! contributors = "contributors.toml"   # or an inline list
//! limit = 10
//! append_if_missing = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::models::MetadataEntry;

/// Where supplemental contributor metadata comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContributorsSetting {
    /// A list of author strings and/or records.
    Inline(Vec<MetadataEntry>),
    /// Path to a JSON or TOML file holding the list.
    Module(String),
    /// Anything else. Rejected when the metadata is loaded.
    Other(serde_json::Value),
}

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorsConfig {
    /// Supplemental metadata.
    #[serde(default)]
    pub contributors: Option<ContributorsSetting>,

    /// Render only the top `limit` contributors; 0 renders everyone.
    #[serde(default)]
    pub limit: usize,

    /// Base directory for resolving the metadata file and reading history.
    /// Defaults to the process working directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Add a Contributors section when the document has none.
    #[serde(default)]
    pub append_if_missing: bool,

    /// Apply the repository `.mailmap` when reading history.
    #[serde(default = "default_mailmap")]
    pub mailmap: bool,

    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mailmap() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            contributors: None,
            limit: 0,
            cwd: None,
            append_if_missing: false,
            mailmap: default_mailmap(),
            log_level: default_log_level(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ContributorsConfig {
    /// Load a [`ContributorsConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: ContributorsConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all fields are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log_level".into(),
                detail: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        if let Some(ContributorsSetting::Module(specifier)) = &self.contributors {
            if specifier.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "contributors".into(),
                    detail: "module path must not be empty".into(),
                });
            }
        }
        if let Some(cwd) = &self.cwd {
            if !cwd.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "cwd".into(),
                    detail: format!("'{}' is not a directory", cwd.display()),
                });
            }
        }

        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
