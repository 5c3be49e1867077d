//! Events consumed by the settings controller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SettingsResult;
use crate::state::{PresetField, SettingsState};
use crate::units::UnitSystem;

/// Input to the controller.
///
/// The first two variants are the asynchronous load boundaries; the rest come
/// from the host application or the UI.
#[derive(Debug)]
pub enum SettingsEvent {
    /// Outcome of the one-time defaults fetch
    DefaultsLoaded(SettingsResult<SettingsState>),
    /// Persisted settings, or `None` when nothing was saved yet
    PersistedLoaded(Option<Value>),
    UnitsChanged(UnitSystem),
    /// Raw unit-change notification from the host application
    UnitNotification(UnitChangeNotification),
    /// Slider edit in display units
    ParameterEdited { field: PresetField, value: f64 },
    PresetSelected(String),
    PresetNameEdited(String),
    CreatePreset(String),
    /// Create a preset named after the current name-field contents
    CreateFromNameField,
    DeletePreset,
    ResetToDefaults,
    /// Re-publish the current view
    Refresh,
    /// Stop [`SettingsController::run`](super::SettingsController::run)
    Shutdown,
}

/// Host notification carrying the new unit system:
/// `{"values": {"unitLengthSystem": "metric"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitChangeNotification {
    pub values: UnitValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitValues {
    #[serde(alias = "uiUnitLength")]
    pub unit_length_system: String,
}

impl UnitChangeNotification {
    pub fn new(units: UnitSystem) -> Self {
        Self {
            values: UnitValues {
                unit_length_system: units.to_string(),
            },
        }
    }

    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The announced unit system; unknown names are an error
    pub fn unit_system(&self) -> SettingsResult<UnitSystem> {
        self.values.unit_length_system.parse()
    }
}
