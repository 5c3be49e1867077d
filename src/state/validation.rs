//! Validation of settings documents before they are trusted.

use super::schema::{PresetField, PresetParameters, SettingsState, BUILTIN_PRESETS};
use crate::error::{SettingsError, SettingsResult};

/// Consistency checks for state components
pub trait StateValidation {
    fn validate(&self) -> SettingsResult<()>;
}

impl StateValidation for PresetParameters {
    fn validate(&self) -> SettingsResult<()> {
        for field in PresetField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(SettingsError::LoadFailure(format!(
                    "{} is not a finite number: {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

impl StateValidation for SettingsState {
    /// Shipped defaults must define every built-in preset
    fn validate(&self) -> SettingsResult<()> {
        for name in BUILTIN_PRESETS {
            let params = self.presets.get(name).ok_or_else(|| {
                SettingsError::LoadFailure(format!("Missing built-in preset: {name}"))
            })?;
            params.validate().map_err(|e| match e {
                SettingsError::LoadFailure(msg) => {
                    SettingsError::LoadFailure(format!("Built-in preset {name}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
