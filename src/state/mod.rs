//! Settings state and its persistence.
//!
//! - [`schema`]: preset records and the settings document
//! - [`collection`]: insertion-ordered preset map
//! - [`store`]: active selection and fork-on-edit rules
//! - [`ordering`]: display order of preset names
//! - [`validation`]: checks applied to shipped defaults
//! - [`defaults`]: fetching the shipped defaults
//! - [`storage`]: key-value persistence backends

pub mod collection;
pub mod defaults;
pub mod ordering;
pub mod schema;
pub mod storage;
pub mod store;
pub mod validation;

pub use collection::PresetCollection;
pub use defaults::{embedded_defaults, parse_defaults, DefaultsSource, DEFAULT_SETTINGS_JSON};
pub use ordering::{order_names, preset_names, sort_priority};
pub use schema::{
    is_builtin, PresetField, PresetParameters, PresetPatch, SettingsState, BUILTIN_PRESETS,
    CUSTOM_PRESET, DEFAULT_PRESET, SETTINGS_KEY,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, ReadCallback, StorageConfig};
pub use store::PresetStore;
pub use validation::StateValidation;
