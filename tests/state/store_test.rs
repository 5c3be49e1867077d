//! Preset store behaviour through the public API

use edc_settings::state::{
    PresetField, PresetPatch, PresetStore, BUILTIN_PRESETS, CUSTOM_PRESET, DEFAULT_PRESET,
};
use edc_settings::SettingsError;

use crate::assert_error_contains;
use crate::test_utils::{constants::USER_PRESET, sample_defaults};

fn store() -> PresetStore {
    PresetStore::new(sample_defaults())
}

#[test]
fn test_defaults_select_default() {
    let store = store();
    assert_eq!(store.chosen_preset(), DEFAULT_PRESET);
    for name in BUILTIN_PRESETS {
        assert!(store.get(name).is_some(), "missing {name}");
    }
    assert!(!store.has_custom());
}

#[test]
fn test_edit_forks_builtin_into_custom() {
    let mut store = store();
    store.set_active("Intense").expect("select");
    let intense = store.active().cloned().expect("intense");

    assert!(store.fork_to_custom());
    store.write_custom_fields(&PresetPatch::field(PresetField::FovMaxSpeed, 30.0));

    assert_eq!(store.chosen_preset(), CUSTOM_PRESET);
    assert_eq!(store.get("Intense"), Some(&intense));

    let custom = store.get(CUSTOM_PRESET).expect("custom");
    assert_eq!(custom.fov_max_speed, 30.0);
    assert_eq!(custom.fov_min_speed, intense.fov_min_speed);
    assert_eq!(custom.extra, intense.extra);
}

#[test]
fn test_second_fork_keeps_existing_custom() {
    let mut store = store();
    store.fork_to_custom();
    store.write_custom_fields(&PresetPatch::field(PresetField::SpeedShakeMinSpeed, 1.0));

    store.set_active("Smooth").expect("select");
    assert!(store.fork_to_custom());

    // The working copy is reused, not reseeded from Smooth
    let custom = store.get(CUSTOM_PRESET).expect("custom");
    assert_eq!(custom.speed_shake_min_speed, 1.0);
}

#[test]
fn test_create_then_delete_user_preset() {
    let mut store = store();
    store.fork_to_custom();
    store.write_custom_fields(&PresetPatch::field(PresetField::FovMinSpeed, 9.0));

    store.create_named(USER_PRESET).expect("create");
    assert_eq!(store.chosen_preset(), USER_PRESET);
    assert!(!store.has_custom());
    assert_eq!(store.active().map(|p| p.fov_min_speed), Some(9.0));

    let removed = store.delete_active().expect("delete");
    assert_eq!(removed, USER_PRESET);
    assert_eq!(store.chosen_preset(), DEFAULT_PRESET);
    assert!(store.get(USER_PRESET).is_none());
}

#[test]
fn test_create_rejections() {
    let mut store = store();
    assert!(matches!(
        store.create_named(USER_PRESET),
        Err(SettingsError::NoCustomPreset)
    ));

    store.fork_to_custom();
    assert!(matches!(store.create_named("  "), Err(SettingsError::EmptyName)));
    assert_error_contains!(store.create_named("Smooth"), "Smooth");

    // Nothing was consumed by the failed attempts
    assert!(store.has_custom());
    assert_eq!(store.chosen_preset(), CUSTOM_PRESET);
}

#[test]
fn test_builtins_cannot_be_deleted() {
    let mut store = store();
    for name in BUILTIN_PRESETS {
        store.set_active(name).expect("select");
        assert!(matches!(
            store.delete_active(),
            Err(SettingsError::BuiltinPreset(_))
        ));
        assert!(store.get(name).is_some());
    }
}

#[test]
fn test_reseed_restores_builtin_values() {
    let defaults = sample_defaults();
    let mut state = defaults.clone();
    if let Some(default) = state.presets.get_mut(DEFAULT_PRESET) {
        default.fov_max_speed = 1000.0;
    }
    state.chosen_preset = "Gone".to_string();

    let mut store = PresetStore::new(state);
    store.reseed_builtins(&defaults.presets);

    assert_eq!(store.get(DEFAULT_PRESET), defaults.presets.get(DEFAULT_PRESET));
    assert_eq!(store.chosen_preset(), DEFAULT_PRESET);
}
