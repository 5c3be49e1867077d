//! Controller driven end to end over a [`FileStore`] and a tokio runtime

use std::time::{Duration, Instant};

use edc_settings::state::{DefaultsSource, CUSTOM_PRESET, SETTINGS_KEY};
use edc_settings::{FileStore, Phase, PresetField, SettingsController, UnitSystem};

use crate::common::{get_test_temp_dir, QUICK_TEST_TIMEOUT_MS};
use crate::test_utils::{recv_timeout, storage_config};

fn pump_until_settled(controller: &mut SettingsController<FileStore>) {
    let deadline = Instant::now() + Duration::from_millis(QUICK_TEST_TIMEOUT_MS);
    while controller.phase() == Phase::Loading {
        assert!(Instant::now() < deadline, "controller never left Loading");
        controller.pump();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_edits_survive_restart() {
    let temp_dir = get_test_temp_dir();
    let runtime = tokio::runtime::Runtime::new().expect("runtime");

    {
        let store = FileStore::new(storage_config(&temp_dir), runtime.handle().clone())
            .expect("store");
        let mut controller = SettingsController::new(store.clone(), UnitSystem::Metric);
        controller.fetch_defaults(DefaultsSource::Embedded, runtime.handle());
        pump_until_settled(&mut controller);
        assert_eq!(controller.phase(), Phase::Ready);

        controller
            .on_parameter_edited(PresetField::SpeedShakeMaxSpeed, 90.0)
            .expect("edit");
        runtime.block_on(store.flush());
    }

    let store =
        FileStore::new(storage_config(&temp_dir), runtime.handle().clone()).expect("store");
    let mut controller = SettingsController::new(store, UnitSystem::Metric);
    let updates = controller.subscribe();
    assert!(recv_timeout(&updates).loading);

    controller.fetch_defaults(DefaultsSource::Embedded, runtime.handle());
    pump_until_settled(&mut controller);

    let view = controller.display();
    assert_eq!(view.chosen_preset, CUSTOM_PRESET);
    assert_eq!(view.speed_shake.max_rounded, 90);
    assert!(temp_dir.path().join(format!("{SETTINGS_KEY}.json")).exists());
}

#[test]
fn test_missing_defaults_file_is_load_error() {
    let temp_dir = get_test_temp_dir();
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let store =
        FileStore::new(storage_config(&temp_dir), runtime.handle().clone()).expect("store");

    let mut controller = SettingsController::new(store, UnitSystem::Imperial);
    let source = DefaultsSource::File(temp_dir.path().join("does-not-exist.json"));
    controller.fetch_defaults(source, runtime.handle());
    pump_until_settled(&mut controller);

    assert_eq!(controller.phase(), Phase::LoadError);
    assert!(controller.display().load_error);
    assert!(!temp_dir.path().join(format!("{SETTINGS_KEY}.json")).exists());
}
