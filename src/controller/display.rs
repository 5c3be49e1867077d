//! Display-side view of the settings.
//!
//! Display values are derived from canonical parameters on every refresh and
//! never written back. Each min/max pair is clamped after conversion so the
//! minimum never exceeds the maximum, even while the stored pair is inverted.

use serde::Serialize;

use crate::state::{is_builtin, PresetParameters, PresetStore, DEFAULT_PRESET};
use crate::units::UnitSystem;

/// Round half toward positive infinity. Values just below a half round down.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}

/// A clamped min/max pair in display units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
    pub min_rounded: i64,
    pub max_rounded: i64,
}

impl DisplayRange {
    /// Convert a canonical pair and clamp it
    pub fn derive(canonical_min: f64, canonical_max: f64, units: UnitSystem) -> Self {
        let min = units.to_display(canonical_min);
        let max = units.to_display(canonical_max);

        let clamped_min = min.min(max);
        let clamped_max = min.max(max);

        Self {
            min: clamped_min,
            max: clamped_max,
            min_rounded: round_half_up(clamped_min),
            max_rounded: round_half_up(clamped_max),
        }
    }
}

/// Everything the UI renders. Read-only from the UI's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub loading: bool,
    pub load_error: bool,
    pub units: UnitSystem,
    pub unit_label: &'static str,
    pub chosen_preset: String,
    pub is_default_preset: bool,
    pub preset_names: Vec<String>,
    pub speed_shake: DisplayRange,
    pub fov: DisplayRange,
    /// Contents of the new-preset name field
    pub preset_name: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::loading(UnitSystem::default())
    }
}

impl DisplayState {
    pub fn loading(units: UnitSystem) -> Self {
        Self {
            loading: true,
            load_error: false,
            units,
            unit_label: units.label(),
            chosen_preset: String::new(),
            is_default_preset: false,
            preset_names: Vec::new(),
            speed_shake: DisplayRange::default(),
            fov: DisplayRange::default(),
            preset_name: String::new(),
        }
    }

    pub fn failed(units: UnitSystem) -> Self {
        Self {
            loading: false,
            load_error: true,
            ..Self::loading(units)
        }
    }

    /// Derive the view of a loaded store.
    ///
    /// Values come from the selected preset, or from `Default` when the
    /// selection has no entry.
    pub fn derive(store: &PresetStore, units: UnitSystem, preset_name: &str) -> Self {
        let chosen = store.chosen_preset();
        let params = store
            .active()
            .or_else(|| store.get(DEFAULT_PRESET))
            .cloned()
            .unwrap_or_default();

        Self {
            loading: false,
            load_error: false,
            units,
            unit_label: units.label(),
            chosen_preset: chosen.to_string(),
            is_default_preset: is_builtin(chosen),
            preset_names: crate::state::preset_names(store.presets()),
            speed_shake: speed_shake_range(&params, units),
            fov: fov_range(&params, units),
            preset_name: preset_name.to_string(),
        }
    }
}

pub fn speed_shake_range(params: &PresetParameters, units: UnitSystem) -> DisplayRange {
    DisplayRange::derive(
        params.speed_shake_min_speed,
        params.speed_shake_max_speed,
        units,
    )
}

pub fn fov_range(params: &PresetParameters, units: UnitSystem) -> DisplayRange {
    DisplayRange::derive(params.fov_min_speed, params.fov_max_speed, units)
}
