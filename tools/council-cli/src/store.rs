//! File-backed preference store.
//!
//! The CLI's stand-in for browser local storage. All keys live in one JSON
//! object at `<state-dir>/storage.json`; the file is rewritten whole on each
//! change via a temporary file and a rename, so readers never see a partial
//! write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use council_search::storage::DEFAULT_QUOTA;
use council_search::{KeyValueStore, MemoryStore, StorageError};

use crate::error::CouncilError;

/// File name of the store inside the state directory.
const STORE_FILE: &str = "storage.json";

/// Return the path of the store file in `state_dir`.
pub fn store_path(state_dir: &Path) -> PathBuf {
    state_dir.join(STORE_FILE)
}

/// Key-value store persisted as one JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
    quota: usize,
}

impl FileStore {
    /// Open the store in `state_dir`, creating the directory if needed.
    ///
    /// A missing file is an empty store. A corrupted file is logged and
    /// treated as empty; it is replaced on the next write.
    pub fn open(state_dir: &Path) -> Result<Self, CouncilError> {
        Self::open_with_quota(state_dir, DEFAULT_QUOTA)
    }

    /// Same as [`FileStore::open`] with a custom byte quota.
    pub fn open_with_quota(state_dir: &Path, quota: usize) -> Result<Self, CouncilError> {
        fs::create_dir_all(state_dir)?;
        let path = store_path(state_dir);

        let data = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("ignoring corrupted store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, data, quota })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn size_of(data: &BTreeMap<String, String>) -> usize {
        data.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Write the whole map atomically.
    fn flush(&self, data: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io = |e: std::io::Error| StorageError::Io(e.to_string());
        let json = serde_json::to_string_pretty(data).map_err(|e| StorageError::Io(e.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io)?;
        fs::rename(&tmp_path, &self.path).map_err(io)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value.to_string());
        if Self::size_of(&next) > self.quota {
            return Err(StorageError::QuotaExceeded);
        }
        self.flush(&next)?;
        self.data = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.remove(key);
        self.flush(&next)?;
        self.data = next;
        Ok(())
    }
}

/// Preference storage for one run.
///
/// Falls back to blocked in-memory storage when the state directory cannot
/// be used, so preferences degrade to defaults instead of failing the
/// command.
#[derive(Debug)]
pub enum PreferenceStore {
    File(FileStore),
    /// Nothing persists; every read and write fails and is logged.
    Blocked(MemoryStore),
}

impl PreferenceStore {
    /// Open the file store in `state_dir`, or fall back to blocked storage.
    pub fn open(state_dir: &Path) -> Self {
        match FileStore::open(state_dir) {
            Ok(store) => Self::File(store),
            Err(e) => {
                log::warn!(
                    "preferences unavailable in {}, using defaults: {}",
                    state_dir.display(),
                    e
                );
                Self::Blocked(MemoryStore::unavailable())
            }
        }
    }

    /// Whether changes reach disk.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl KeyValueStore for PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::File(store) => store.get(key),
            Self::Blocked(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Blocked(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.remove(key),
            Self::Blocked(store) => store.remove(key),
        }
    }
}
