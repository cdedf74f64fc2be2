//! Domain configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure loading a [`DomainConfig`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read domain config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid domain config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Qualifier for directive and role names (`dn:class`, `dn:meth`).
    pub name: String,
    pub label: String,
    /// Warn about references that do not resolve.
    pub nitpicky: bool,
    /// Targets never reported as unresolved.
    pub nitpick_ignore: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        DomainConfig {
            name: "dn".to_string(),
            label: ".NET".to_string(),
            nitpicky: false,
            nitpick_ignore: Vec::new(),
        }
    }
}

impl DomainConfig {
    /// Load from `config_path`; `Ok(None)` if the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source,
            })
    }

    pub fn is_ignored(&self, target: &str) -> bool {
        self.nitpick_ignore.iter().any(|t| t == target)
    }
}
