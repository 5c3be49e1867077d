//! Configuration management (<config dir>/edc-settings/config.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SettingsResult;
use crate::state::{DefaultsSource, StorageConfig};
use crate::units::UnitSystem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdcConfig {
    /// Display units until the host announces otherwise
    #[serde(default)]
    pub units: UnitSystem,
    /// JSON file replacing the embedded defaults
    #[serde(default)]
    pub defaults_path: Option<PathBuf>,
    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EdcConfig {
    fn default() -> Self {
        Self {
            units: UnitSystem::default(),
            defaults_path: None,
            log_filter: default_log_filter(),
            storage: StorageConfig::default(),
        }
    }
}

impl EdcConfig {
    pub fn defaults_source(&self) -> DefaultsSource {
        match &self.defaults_path {
            Some(path) => DefaultsSource::File(path.clone()),
            None => DefaultsSource::Embedded,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("edc-settings"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Load from the standard location, falling back to defaults
pub fn load() -> EdcConfig {
    let Some(path) = config_path() else {
        return EdcConfig::default();
    };
    if !path.exists() {
        return EdcConfig::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring invalid config {:?}: {}", path, e);
            EdcConfig::default()
        }
    }
}

/// Load from `path`, surfacing read and parse errors
pub fn load_from(path: &Path) -> SettingsResult<EdcConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
