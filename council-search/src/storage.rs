//! Key-value preference storage
//!
//! Abstraction over browser-style local storage. Personalization and theme
//! preferences go through a [`KeyValueStore`]; failures there never reach
//! the caller, they are logged and a default is used instead.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

// ── Constants ───────────────────────────────────────────────

/// Default quota per store (5 MB, keys + values).
pub const DEFAULT_QUOTA: usize = 5 * 1024 * 1024;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "council-theme";

/// Storage key of the task usage counters.
pub const USAGE_KEY: &str = "council-task-usage";

// ── Types ───────────────────────────────────────────────────

/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Key + value would exceed the quota
    QuotaExceeded,
    /// Storage is disabled or blocked
    Unavailable,
    /// Backing I/O failure
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QuotaExceeded => write!(f, "QuotaExceededError"),
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(msg) => write!(f, "storage I/O error: {}", msg),
        }
    }
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store with a byte quota.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: BTreeMap<String, String>,
    current_size: usize,
    quota: usize,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA)
    }

    /// Create an empty store with a custom quota.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            data: BTreeMap::new(),
            current_size: 0,
            quota,
            available: true,
        }
    }

    /// A store whose every operation fails, like storage blocked by
    /// privacy settings.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Current byte usage.
    pub fn size(&self) -> usize {
        self.current_size
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;

        let old_entry_size = self.data.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        let projected = self.current_size - old_entry_size + key.len() + value.len();
        if projected > self.quota {
            return Err(StorageError::QuotaExceeded);
        }

        self.data.insert(String::from(key), String::from(value));
        self.current_size = projected;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        if let Some(value) = self.data.remove(key) {
            self.current_size = self.current_size.saturating_sub(key.len() + value.len());
        }
        Ok(())
    }
}

// ── Error-swallowing helpers ────────────────────────────────

/// Read a key, treating errors as absence.
pub fn read_logged<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("[Storage] read of '{}' failed: {}", key, e);
            None
        }
    }
}

/// Write a key, logging and dropping any error. Returns whether the write
/// succeeded.
pub fn write_logged<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[Storage] write of '{}' failed: {}", key, e);
            false
        }
    }
}

/// Remove a key, logging and dropping any error.
pub fn remove_logged<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[Storage] remove of '{}' failed: {}", key, e);
            false
        }
    }
}
