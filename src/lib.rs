//! Enhanced driver camera settings
//!
//! Preset-based configuration for the speed-shake and field-of-view effects:
//! built-in and user presets, fork-on-edit into a `Custom` working copy,
//! metric/imperial display, and persistence through a key-value store.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod units;

// Re-export commonly used types
pub use controller::{DisplayRange, DisplayState, Phase, SettingsController, SettingsEvent};
pub use error::{SettingsError, SettingsResult};
pub use state::{
    DefaultsSource, FileStore, KeyValueStore, MemoryStore, PresetField, PresetParameters,
    PresetStore, SettingsState,
};
pub use units::UnitSystem;
