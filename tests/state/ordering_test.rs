//! Preset name ordering

use edc_settings::state::{order_names, preset_names, PresetCollection, PresetParameters};

#[test]
fn test_documented_example() {
    let ordered = order_names([
        "VR (Thrill)",
        "MyPreset",
        "Default",
        "Custom",
        "Smooth",
        "Intense",
        "VR (Comfort)",
    ]);
    assert_eq!(
        ordered,
        [
            "Default",
            "Intense",
            "Smooth",
            "VR (Comfort)",
            "VR (Thrill)",
            "Custom",
            "MyPreset"
        ]
    );
}

#[test]
fn test_user_presets_keep_collection_order() {
    let presets: PresetCollection = ["Zeta", "Custom", "Alpha", "Default", "Mid"]
        .into_iter()
        .map(|name| (name.to_string(), PresetParameters::default()))
        .collect();

    assert_eq!(
        preset_names(&presets),
        ["Default", "Custom", "Zeta", "Alpha", "Mid"]
    );
}

#[test]
fn test_empty_and_unknown_only() {
    assert!(order_names(Vec::<&str>::new()).is_empty());
    assert_eq!(order_names(["b", "a"]), ["b", "a"]);
}
