//! Shipped default settings.
//!
//! Defaults are fetched once at startup, either from the copy embedded in the
//! binary or from a JSON file, and validated before use.

use std::path::PathBuf;

use tracing::{info, warn};

use super::schema::{SettingsState, DEFAULT_PRESET};
use super::validation::StateValidation;
use crate::error::{SettingsError, SettingsResult};

/// Defaults compiled into the crate
pub const DEFAULT_SETTINGS_JSON: &str = include_str!("../../assets/default_settings.json");

/// Where default settings come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultsSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl DefaultsSource {
    /// Fetch and validate the defaults. Any failure is a `LoadFailure`.
    pub async fn load(&self) -> SettingsResult<SettingsState> {
        let defaults = match self {
            DefaultsSource::Embedded => parse_defaults(DEFAULT_SETTINGS_JSON)?,
            DefaultsSource::File(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    SettingsError::LoadFailure(format!("{}: {}", path.display(), e))
                })?;
                parse_defaults(&json)?
            }
        };
        info!(
            "Loaded {} default presets from {:?}",
            defaults.presets.len(),
            self
        );
        Ok(defaults)
    }
}

/// Parse and validate a defaults document
pub fn parse_defaults(json: &str) -> SettingsResult<SettingsState> {
    let mut defaults: SettingsState =
        serde_json::from_str(json).map_err(|e| SettingsError::LoadFailure(e.to_string()))?;
    defaults.validate()?;

    if !defaults.presets.contains(&defaults.chosen_preset) {
        warn!(
            "Default selection {:?} is not a known preset, using {}",
            defaults.chosen_preset, DEFAULT_PRESET
        );
        defaults.chosen_preset = DEFAULT_PRESET.to_string();
    }
    Ok(defaults)
}

/// The embedded defaults, parsed
pub fn embedded_defaults() -> SettingsResult<SettingsState> {
    parse_defaults(DEFAULT_SETTINGS_JSON)
}
