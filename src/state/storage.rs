//! Key-value persistence for settings.
//!
//! The settings core only needs two calls: a fire-and-forget `write` and a
//! `read` that answers through a callback. [`MemoryStore`] answers reads
//! immediately; [`FileStore`] keeps one JSON file per key and does its I/O on
//! a tokio runtime, writing atomically through a temporary file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{SettingsError, SettingsResult};

/// Callback receiving the stored value, or `None` when the key is absent
pub type ReadCallback = Box<dyn FnOnce(Option<Value>) + Send + 'static>;

/// Opaque key-value persistence channel
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`. Failures are not reported back.
    fn write(&self, key: &str, value: Value);

    /// Look up `key` and hand the result to `callback`, possibly later and
    /// on another thread.
    fn read(&self, key: &str, callback: ReadCallback);
}

/// In-process store shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_entry(key: &str, value: Value) -> Self {
        let store = Self::new();
        store.entries.lock().insert(key.to_string(), value);
        store
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    /// Number of writes received so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl KeyValueStore for MemoryStore {
    fn write(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
        *self.writes.lock() += 1;
    }

    fn read(&self, key: &str, callback: ReadCallback) {
        let value = self.get(key);
        callback(value);
    }
}

/// File store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per key
    pub directory: PathBuf,
    /// Write through a temporary file and rename
    pub atomic_writes: bool,
    /// Maximum serialized size in bytes
    pub max_file_size: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("edc-settings"),
            atomic_writes: true,
            max_file_size: 1024 * 1024, // 1MB
        }
    }
}

impl StorageConfig {
    /// File backing `key`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

enum StoreCommand {
    Write { key: String, value: Value },
    Read { key: String, callback: ReadCallback },
    Flush(oneshot::Sender<()>),
}

/// JSON-file store driven by a tokio runtime.
///
/// Reads and writes go through a single background task, so they are handled
/// in the order they were issued and a read sees every earlier write.
#[derive(Clone)]
pub struct FileStore {
    config: Arc<StorageConfig>,
    commands: mpsc::UnboundedSender<StoreCommand>,
}

impl FileStore {
    /// Create the storage directory and start the I/O task on `runtime`
    pub fn new(config: StorageConfig, runtime: Handle) -> SettingsResult<Self> {
        std::fs::create_dir_all(&config.directory)?;

        let config = Arc::new(config);
        let (commands, rx) = mpsc::unbounded_channel();
        runtime.spawn(io_task(config.clone(), rx));

        info!("File store ready at {:?}", config.directory);
        Ok(Self { config, commands })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Wait until every command issued so far has been handled
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.commands.send(StoreCommand::Flush(tx)).is_err() {
            return;
        }
        let _ = rx.await;
    }

    /// Read `key` directly, without waiting for queued writes.
    /// Missing files yield `Ok(None)`.
    pub async fn load(&self, key: &str) -> SettingsResult<Option<Value>> {
        load_entry(&self.config.entry_path(key)).await
    }
}

impl KeyValueStore for FileStore {
    fn write(&self, key: &str, value: Value) {
        let command = StoreCommand::Write {
            key: key.to_string(),
            value,
        };
        if self.commands.send(command).is_err() {
            warn!("File store writer is gone, dropping write to {:?}", key);
        }
    }

    fn read(&self, key: &str, callback: ReadCallback) {
        let command = StoreCommand::Read {
            key: key.to_string(),
            callback,
        };
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command) {
            warn!("File store task is gone, reading {:?} as absent", key);
            if let StoreCommand::Read { callback, .. } = command {
                callback(None);
            }
        }
    }
}

async fn io_task(config: Arc<StorageConfig>, mut rx: mpsc::UnboundedReceiver<StoreCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            StoreCommand::Write { key, value } => {
                if let Err(e) = write_entry(&config, &key, &value).await {
                    warn!("Failed to persist {:?}: {}", key, e);
                }
            }
            StoreCommand::Read { key, callback } => {
                let path = config.entry_path(&key);
                let value = match load_entry(&path).await {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                        None
                    }
                };
                callback(value);
            }
            StoreCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("File store task stopped");
}

async fn load_entry(path: &Path) -> SettingsResult<Option<Value>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let value = serde_json::from_str(&contents)?;
    Ok(Some(value))
}

async fn write_entry(config: &StorageConfig, key: &str, value: &Value) -> SettingsResult<()> {
    let data = serde_json::to_string_pretty(value)?;
    if data.len() as u64 > config.max_file_size {
        return Err(SettingsError::Storage(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Settings too large: {} bytes > {} bytes limit",
                data.len(),
                config.max_file_size
            ),
        )));
    }

    let path = config.entry_path(key);
    if config.atomic_writes {
        atomic_write(&path, &data).await?;
    } else {
        direct_write(&path, &data).await?;
    }
    debug!("Wrote {:?}", path);
    Ok(())
}

/// Atomic write using temporary file and rename
async fn atomic_write(path: &Path, data: &str) -> SettingsResult<()> {
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = temp_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    {
        let mut temp_file = fs::File::create(&temp_path).await?;
        temp_file.write_all(data.as_bytes()).await?;
        temp_file.flush().await?;
        temp_file.sync_all().await?;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

async fn direct_write(path: &Path, data: &str) -> SettingsResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let mut file = fs::File::create(path).await?;
    file.write_all(data.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
