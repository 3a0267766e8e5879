//! Local persistent key-value storage.
//!
//! Only one key is used by the flow: [`LAST_SENT_KEY`], holding the epoch
//! millisecond timestamp of the last successful submission as a decimal
//! string.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::StoreError;

pub const LAST_SENT_KEY: &str = "contact_last_sent_at";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads the last successful submission time.
///
/// Missing, unreadable and non-numeric values all count as "never sent".
pub fn last_sent_at(store: &impl KeyValueStore) -> Option<u64> {
    let raw = match store.get(LAST_SENT_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read last sent timestamp");
            return None;
        }
    };

    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(raw = %raw, "ignoring malformed last sent timestamp");
            None
        }
    }
}

pub fn set_last_sent_at(store: &impl KeyValueStore, now_ms: u64) -> Result<(), StoreError> {
    store.set(LAST_SENT_KEY, &now_ms.to_string())
}

/// In-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<Mutex<HashMap<String, String>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.0.lock().map_err(|_| StoreError::Poisoned)?;

        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.0.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.0.lock().map_err(|_| StoreError::Poisoned)?;
        map.remove(key);

        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Like [`Self::read`], but a corrupt file is replaced on the next write.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read() {
            Err(StoreError::Serde(err)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "overwriting corrupt contact store"
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_for_update()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_for_update()?;
        if map.remove(key).is_some() {
            self.write(&map)?;
        }

        Ok(())
    }
}
