//! File and memory key-value stores

use edc_settings::state::{FileStore, KeyValueStore, MemoryStore, SETTINGS_KEY};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::common::get_test_temp_dir;
use crate::test_utils::storage_config;

async fn read_via_callback(store: &impl KeyValueStore, key: &str) -> Option<Value> {
    let (tx, rx) = oneshot::channel();
    store.read(
        key,
        Box::new(move |value| {
            let _ = tx.send(value);
        }),
    );
    rx.await.expect("read callback dropped")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_store_write_then_read() {
    let temp_dir = get_test_temp_dir();
    let store = FileStore::new(storage_config(&temp_dir), Handle::current())
        .expect("Failed to create store");

    let value = json!({"chosenPreset": "Custom", "presets": {"Custom": {"fovMinSpeed": 3.0}}});
    store.write(SETTINGS_KEY, value.clone());
    store.flush().await;

    assert_eq!(read_via_callback(&store, SETTINGS_KEY).await, Some(value.clone()));
    assert_eq!(store.load(SETTINGS_KEY).await.expect("load"), Some(value));
    assert!(temp_dir.path().join("edcSettings.json").exists());
    assert!(!temp_dir.path().join("edcSettings.tmp").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_store_writes_land_in_order() {
    let temp_dir = get_test_temp_dir();
    let store = FileStore::new(storage_config(&temp_dir), Handle::current())
        .expect("Failed to create store");

    for i in 0..20 {
        store.write("edcMaxFov", json!(i));
    }
    store.flush().await;

    assert_eq!(store.load("edcMaxFov").await.expect("load"), Some(json!(19)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_store_read_sees_queued_writes() {
    let temp_dir = get_test_temp_dir();
    let store = FileStore::new(storage_config(&temp_dir), Handle::current())
        .expect("Failed to create store");

    for round in 0..5 {
        for i in 0..10 {
            store.write(SETTINGS_KEY, json!({"round": round, "write": i}));
        }
        // No flush: the read queues behind the writes above
        assert_eq!(
            read_via_callback(&store, SETTINGS_KEY).await,
            Some(json!({"round": round, "write": 9}))
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_store_missing_and_corrupt_entries() {
    let temp_dir = get_test_temp_dir();
    let store = FileStore::new(storage_config(&temp_dir), Handle::current())
        .expect("Failed to create store");

    assert_eq!(read_via_callback(&store, SETTINGS_KEY).await, None);

    tokio::fs::write(temp_dir.path().join("edcSettings.json"), "{not json")
        .await
        .expect("write garbage");
    assert!(store.load(SETTINGS_KEY).await.is_err());
    // Reads through the callback treat unreadable data as absent
    assert_eq!(read_via_callback(&store, SETTINGS_KEY).await, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_store_non_atomic_mode() {
    let temp_dir = get_test_temp_dir();
    let mut config = storage_config(&temp_dir);
    config.atomic_writes = false;
    let store = FileStore::new(config, Handle::current()).expect("Failed to create store");

    store.write("edcMaxFov", json!(76));
    store.flush().await;
    assert_eq!(store.load("edcMaxFov").await.expect("load"), Some(json!(76)));
}

#[tokio::test]
async fn test_memory_store_shares_between_clones() {
    let store = MemoryStore::new();
    let sink = store.clone();

    sink.write("edcMaxFov", json!(76));
    assert_eq!(store.get("edcMaxFov"), Some(json!(76)));
    assert_eq!(store.write_count(), 1);
    assert_eq!(read_via_callback(&store, "edcMaxFov").await, Some(json!(76)));
    assert_eq!(read_via_callback(&store, "missing").await, None);
}
