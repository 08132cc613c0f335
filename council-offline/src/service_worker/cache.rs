//! Cache storage
//!
//! Named caches, one per deployment generation. Entries are keyed on
//! `METHOD:URL`; sizes are tracked so the storage can enforce a quota.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use spin::RwLock;

use super::fetch::{Request, Response};

// ── Constants ───────────────────────────────────────────────

/// Default quota across all caches (50 MB).
pub const DEFAULT_CACHE_QUOTA: usize = 50 * 1024 * 1024;

// ── Types ───────────────────────────────────────────────────

/// Cache error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache not found
    NotFound(String),
    /// Storing would exceed the quota
    QuotaExceeded { needed: usize, quota: usize },
    /// Backing store failure
    StorageError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound(name) => write!(f, "cache not found: {}", name),
            CacheError::QuotaExceeded { needed, quota } => {
                write!(f, "cache quota exceeded ({} of {} bytes)", needed, quota)
            }
            CacheError::StorageError(msg) => write!(f, "cache storage error: {}", msg),
        }
    }
}

/// A cached request-response pair
#[derive(Debug, Clone)]
struct CacheEntry {
    request: Request,
    response: Response,
}

impl CacheEntry {
    fn size(&self) -> usize {
        self.response.size()
    }
}

/// One cache generation
#[derive(Debug, Clone)]
pub struct Cache {
    name: String,
    /// `METHOD:URL` -> entry
    entries: BTreeMap<String, CacheEntry>,
    total_size: usize,
}

impl Cache {
    /// Create an empty cache
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            total_size: 0,
        }
    }

    /// Get cache name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the stored response for a request
    pub fn match_request(&self, request: &Request) -> Option<Response> {
        self.entries.get(&make_key(request)).map(|e| e.response.clone())
    }

    /// Store a pair, replacing any previous entry for the same key
    pub fn put(&mut self, request: Request, response: Response) {
        let key = make_key(&request);
        let entry = CacheEntry { request, response };
        let size = entry.size();

        if let Some(old) = self.entries.insert(key, entry) {
            self.total_size -= old.size();
        }
        self.total_size += size;
    }

    /// Remove the entry for a request. Returns whether one existed.
    pub fn delete(&mut self, request: &Request) -> bool {
        match self.entries.remove(&make_key(request)) {
            Some(entry) => {
                self.total_size -= entry.size();
                true
            }
            None => false,
        }
    }

    /// All stored requests, in key order
    pub fn keys(&self) -> Vec<Request> {
        self.entries.values().map(|e| e.request.clone()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get total size
    pub fn size(&self) -> usize {
        self.total_size
    }
}

/// Make a cache key from a request
fn make_key(request: &Request) -> String {
    format!("{}:{}", request.method.as_str(), request.url)
}

/// Cache storage (manages multiple caches)
#[derive(Debug)]
pub struct CacheStorage {
    caches: BTreeMap<String, Cache>,
    quota: usize,
}

/// Cache storage shared between concurrent request handlers.
///
/// Guards are never held across an `.await`.
pub type SharedCacheStorage = Arc<RwLock<CacheStorage>>;

impl Default for CacheStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStorage {
    /// Create new cache storage with the default quota
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_CACHE_QUOTA)
    }

    /// Create new cache storage with a custom quota
    pub fn with_quota(quota: usize) -> Self {
        Self {
            caches: BTreeMap::new(),
            quota,
        }
    }

    /// Wrap for sharing
    pub fn shared(self) -> SharedCacheStorage {
        Arc::new(RwLock::new(self))
    }

    /// Open or create a cache
    pub fn open(&mut self, name: &str) -> &mut Cache {
        self.caches
            .entry(name.to_string())
            .or_insert_with(|| Cache::new(name))
    }

    /// Check if a cache exists
    pub fn has(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    /// Get a cache by name
    pub fn get(&self, name: &str) -> Option<&Cache> {
        self.caches.get(name)
    }

    /// Get a mutable cache by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cache> {
        self.caches.get_mut(name)
    }

    /// Delete a cache. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    /// Get all cache names
    pub fn keys(&self) -> Vec<String> {
        self.caches.keys().cloned().collect()
    }

    /// Look up a request in one named cache
    pub fn match_in(&self, name: &str, request: &Request) -> Option<Response> {
        self.caches.get(name).and_then(|c| c.match_request(request))
    }

    /// Store a pair in the named cache, creating it if needed.
    pub fn put(&mut self, name: &str, request: Request, response: Response) -> Result<(), CacheError> {
        self.populate(name, core::iter::once((request, response)))
    }

    /// Store a batch of pairs in the named cache, all or nothing.
    ///
    /// On error the cache is left exactly as it was (and is not created).
    pub fn populate(
        &mut self,
        name: &str,
        pairs: impl IntoIterator<Item = (Request, Response)>,
    ) -> Result<(), CacheError> {
        let mut staged = self.caches.get(name).cloned().unwrap_or_else(|| Cache::new(name));
        let before = staged.size();
        for (request, response) in pairs {
            staged.put(request, response);
        }

        let needed = self.usage() - before + staged.size();
        if needed > self.quota {
            return Err(CacheError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }

        self.caches.insert(name.to_string(), staged);
        Ok(())
    }

    /// Get quota
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Get usage
    pub fn usage(&self) -> usize {
        self.caches.values().map(|c| c.size()).sum()
    }
}
