//! Conversion between canonical speeds and the selected display unit.
//!
//! Canonical values are stored in metres per second. Display values are
//! km/h for the metric system and mph for the imperial one. No rounding
//! happens here; that is a display concern of the controller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Display unit system for speed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilometres per hour
    Metric,
    /// Miles per hour
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Multiplier from canonical m/s to the display unit
    pub fn multiplier(self) -> f64 {
        match self {
            UnitSystem::Metric => 3.6,
            UnitSystem::Imperial => 2.23694,
        }
    }

    /// Label shown next to display values
    pub fn label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    /// Convert a canonical value into this unit
    pub fn to_display(self, canonical: f64) -> f64 {
        canonical * self.multiplier()
    }

    /// Convert a value in this unit back to canonical
    pub fn to_canonical(self, display: f64) -> f64 {
        display / self.multiplier()
    }
}

impl FromStr for UnitSystem {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(SettingsError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}
