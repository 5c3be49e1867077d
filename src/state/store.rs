//! Preset collection plus active selection, with fork-on-edit.
//!
//! Edits never touch the preset they were made against: the first edit
//! switches the selection to the `Custom` working copy, which is created
//! from the active preset if it does not exist yet.

use tracing::{debug, info, warn};

use super::collection::PresetCollection;
use super::schema::{
    is_builtin, PresetParameters, PresetPatch, SettingsState, CUSTOM_PRESET, DEFAULT_PRESET,
};
use crate::error::{SettingsError, SettingsResult};

#[derive(Debug, Clone, Default)]
pub struct PresetStore {
    state: SettingsState,
}

impl PresetStore {
    pub fn new(state: SettingsState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub fn presets(&self) -> &PresetCollection {
        &self.state.presets
    }

    pub fn chosen_preset(&self) -> &str {
        &self.state.chosen_preset
    }

    pub fn get(&self, name: &str) -> Option<&PresetParameters> {
        self.state.presets.get(name)
    }

    /// Parameters of the selected preset
    pub fn active(&self) -> Option<&PresetParameters> {
        self.get(&self.state.chosen_preset)
    }

    pub fn has_custom(&self) -> bool {
        self.state.presets.contains(CUSTOM_PRESET)
    }

    /// Select `name`; unknown names are rejected and leave the selection alone
    pub fn set_active(&mut self, name: &str) -> SettingsResult<()> {
        if !self.state.presets.contains(name) {
            return Err(SettingsError::InvalidPreset(name.to_string()));
        }
        self.state.chosen_preset = name.to_string();
        Ok(())
    }

    /// Switch the selection to `Custom`, creating it from the active preset
    /// if needed. Returns true when the selection changed.
    pub fn fork_to_custom(&mut self) -> bool {
        if self.state.chosen_preset == CUSTOM_PRESET {
            return false;
        }

        if !self.has_custom() {
            let Some(source) = self.active().cloned() else {
                warn!(
                    "Cannot fork unknown preset {:?} into {}",
                    self.state.chosen_preset, CUSTOM_PRESET
                );
                return false;
            };
            self.state.presets.insert(CUSTOM_PRESET.to_string(), source);
        }

        debug!("Forked {:?} into {}", self.state.chosen_preset, CUSTOM_PRESET);
        self.state.chosen_preset = CUSTOM_PRESET.to_string();
        true
    }

    /// Merge `patch` into the `Custom` entry.
    ///
    /// A missing `Custom` entry is seeded from the active preset first; with
    /// neither present this does nothing.
    pub fn write_custom_fields(&mut self, patch: &PresetPatch) {
        if !self.has_custom() {
            match self.active().cloned() {
                Some(source) => {
                    self.state.presets.insert(CUSTOM_PRESET.to_string(), source);
                }
                None => {
                    debug!("No {} entry to write to", CUSTOM_PRESET);
                    return;
                }
            }
        }

        if let Some(custom) = self.state.presets.get_mut(CUSTOM_PRESET) {
            custom.apply(patch);
        }
    }

    /// Commit the `Custom` working copy under `name` and select it
    pub fn create_named(&mut self, name: &str) -> SettingsResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettingsError::EmptyName);
        }
        if self.state.presets.contains(name) {
            return Err(SettingsError::DuplicateName(name.to_string()));
        }
        let params = self
            .state
            .presets
            .remove(CUSTOM_PRESET)
            .ok_or(SettingsError::NoCustomPreset)?;

        self.state.presets.insert(name.to_string(), params);
        self.state.chosen_preset = name.to_string();
        info!("Created preset {:?}", name);
        Ok(())
    }

    /// Delete the selected preset and fall back to `Default`.
    ///
    /// Built-ins are refused. Returns the name that was removed.
    pub fn delete_active(&mut self) -> SettingsResult<String> {
        let name = self.state.chosen_preset.clone();
        if is_builtin(&name) {
            return Err(SettingsError::BuiltinPreset(name));
        }

        self.state.presets.remove(&name);
        self.state.chosen_preset = DEFAULT_PRESET.to_string();
        info!("Deleted preset {:?}", name);
        Ok(name)
    }

    /// Replace built-in entries with the shipped defaults
    pub fn reseed_builtins(&mut self, defaults: &PresetCollection) {
        self.state.reseed_builtins(defaults);
    }
}
