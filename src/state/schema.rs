//! Preset parameter records and the settings document.
//!
//! The same `SettingsState` shape is used for the shipped defaults and for the
//! value persisted under [`SETTINGS_KEY`]; the persisted copy never carries
//! built-in presets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collection::PresetCollection;
use crate::error::SettingsError;

/// Key under which settings are persisted
pub const SETTINGS_KEY: &str = "edcSettings";

/// Preset selected when nothing else applies
pub const DEFAULT_PRESET: &str = "Default";

/// Name of the transient, editable working copy
pub const CUSTOM_PRESET: &str = "Custom";

/// Shipped presets, in display order
pub const BUILTIN_PRESETS: [&str; 5] = [
    DEFAULT_PRESET,
    "Intense",
    "Smooth",
    "VR (Comfort)",
    "VR (Thrill)",
];

/// True for the five shipped preset names
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_PRESETS.contains(&name)
}

/// The four speed fields the settings core inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetField {
    SpeedShakeMinSpeed,
    SpeedShakeMaxSpeed,
    FovMinSpeed,
    FovMaxSpeed,
}

impl PresetField {
    pub const ALL: [PresetField; 4] = [
        PresetField::SpeedShakeMinSpeed,
        PresetField::SpeedShakeMaxSpeed,
        PresetField::FovMinSpeed,
        PresetField::FovMaxSpeed,
    ];

    /// Field name as it appears in the settings document
    pub fn key(self) -> &'static str {
        match self {
            PresetField::SpeedShakeMinSpeed => "speedShakeMinSpeed",
            PresetField::SpeedShakeMaxSpeed => "speedShakeMaxSpeed",
            PresetField::FovMinSpeed => "fovMinSpeed",
            PresetField::FovMaxSpeed => "fovMaxSpeed",
        }
    }
}

impl FromStr for PresetField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SettingsError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for PresetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parameters of one preset.
///
/// Speeds are canonical (m/s). Every other field of the record is kept
/// verbatim in `extra` and round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresetParameters {
    pub speed_shake_min_speed: f64,
    pub speed_shake_max_speed: f64,
    pub fov_min_speed: f64,
    pub fov_max_speed: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PresetParameters {
    pub fn get(&self, field: PresetField) -> f64 {
        match field {
            PresetField::SpeedShakeMinSpeed => self.speed_shake_min_speed,
            PresetField::SpeedShakeMaxSpeed => self.speed_shake_max_speed,
            PresetField::FovMinSpeed => self.fov_min_speed,
            PresetField::FovMaxSpeed => self.fov_max_speed,
        }
    }

    pub fn set(&mut self, field: PresetField, value: f64) {
        match field {
            PresetField::SpeedShakeMinSpeed => self.speed_shake_min_speed = value,
            PresetField::SpeedShakeMaxSpeed => self.speed_shake_max_speed = value,
            PresetField::FovMinSpeed => self.fov_min_speed = value,
            PresetField::FovMaxSpeed => self.fov_max_speed = value,
        }
    }

    /// Merge the fields present in `patch`, leaving the rest alone
    pub fn apply(&mut self, patch: &PresetPatch) {
        for (field, value) in patch.speeds() {
            self.set(field, value);
        }
        for (key, value) in &patch.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Partial update of a preset's parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetPatch {
    pub speed_shake_min_speed: Option<f64>,
    pub speed_shake_max_speed: Option<f64>,
    pub fov_min_speed: Option<f64>,
    pub fov_max_speed: Option<f64>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PresetPatch {
    /// Patch touching a single speed field
    pub fn field(field: PresetField, value: f64) -> Self {
        let mut patch = Self::default();
        match field {
            PresetField::SpeedShakeMinSpeed => patch.speed_shake_min_speed = Some(value),
            PresetField::SpeedShakeMaxSpeed => patch.speed_shake_max_speed = Some(value),
            PresetField::FovMinSpeed => patch.fov_min_speed = Some(value),
            PresetField::FovMaxSpeed => patch.fov_max_speed = Some(value),
        }
        patch
    }

    /// Speed fields set by this patch
    pub fn speeds(&self) -> impl Iterator<Item = (PresetField, f64)> + '_ {
        [
            (PresetField::SpeedShakeMinSpeed, self.speed_shake_min_speed),
            (PresetField::SpeedShakeMaxSpeed, self.speed_shake_max_speed),
            (PresetField::FovMinSpeed, self.fov_min_speed),
            (PresetField::FovMaxSpeed, self.fov_max_speed),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.speeds().next().is_none() && self.extra.is_empty()
    }
}

fn default_chosen_preset() -> String {
    DEFAULT_PRESET.to_string()
}

/// Selected preset plus every known preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    #[serde(default = "default_chosen_preset")]
    pub chosen_preset: String,
    #[serde(default)]
    pub presets: PresetCollection,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            chosen_preset: default_chosen_preset(),
            presets: PresetCollection::new(),
        }
    }
}

impl SettingsState {
    /// Copy suitable for persistence: built-in entries are stripped
    pub fn persistable(&self) -> SettingsState {
        SettingsState {
            chosen_preset: self.chosen_preset.clone(),
            presets: self
                .presets
                .iter()
                .filter(|(name, _)| !is_builtin(name))
                .map(|(name, params)| (name.to_string(), params.clone()))
                .collect(),
        }
    }

    /// Overwrite every built-in entry with the shipped copy in `defaults`
    pub fn reseed_builtins(&mut self, defaults: &PresetCollection) {
        for name in BUILTIN_PRESETS {
            if let Some(params) = defaults.get(name) {
                self.presets.insert(name.to_string(), params.clone());
            }
        }
        if !self.presets.contains(&self.chosen_preset) {
            tracing::warn!(
                "Chosen preset {:?} is unknown, selecting {}",
                self.chosen_preset,
                DEFAULT_PRESET
            );
            self.chosen_preset = default_chosen_preset();
        }
    }
}
