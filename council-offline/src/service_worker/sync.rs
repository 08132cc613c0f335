//! Periodic Background Sync
//!
//! The host fires periodic sync events by tag. The only tag the site uses
//! is `update-content`, whose refresh hook is an extension point: it runs
//! but does no work yet.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Tag of the content refresh sync
pub const UPDATE_CONTENT_TAG: &str = "update-content";

/// Default minimum interval between content refreshes (12 hours).
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 12 * 60 * 60 * 1000;

/// One periodic sync registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicSyncRegistration {
    tag: String,
    min_interval_ms: u64,
    last_fired_at: Option<u64>,
}

impl PeriodicSyncRegistration {
    /// Get tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Minimum interval between firings (ms)
    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// When the sync last fired (ms), if ever
    pub fn last_fired_at(&self) -> Option<u64> {
        self.last_fired_at
    }

    fn is_due(&self, now_ms: u64) -> bool {
        match self.last_fired_at {
            Some(last) => now_ms.saturating_sub(last) >= self.min_interval_ms,
            None => true,
        }
    }
}

/// What happened when a periodic sync fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The content refresh hook ran
    ContentRefreshed,
    /// Fired before its minimum interval elapsed; skipped
    TooSoon,
    /// Tag not registered
    UnknownTag,
    /// Registered tag with no handler
    Ignored,
}

/// Periodic sync registrations by tag
#[derive(Debug, Clone, Default)]
pub struct PeriodicSyncRegistry {
    registrations: BTreeMap<String, PeriodicSyncRegistration>,
}

impl PeriodicSyncRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `update-content` registered at the default interval
    pub fn with_content_refresh() -> Self {
        let mut registry = Self::new();
        registry.register(UPDATE_CONTENT_TAG, DEFAULT_MIN_INTERVAL_MS);
        registry
    }

    /// Register a tag. Re-registering updates the interval.
    pub fn register(&mut self, tag: &str, min_interval_ms: u64) {
        self.registrations
            .entry(tag.to_string())
            .and_modify(|r| r.min_interval_ms = min_interval_ms)
            .or_insert_with(|| PeriodicSyncRegistration {
                tag: tag.to_string(),
                min_interval_ms,
                last_fired_at: None,
            });
    }

    /// Unregister a tag
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.registrations.remove(tag).is_some()
    }

    /// Get a registration by tag
    pub fn get(&self, tag: &str) -> Option<&PeriodicSyncRegistration> {
        self.registrations.get(tag)
    }

    /// All registered tags
    pub fn tags(&self) -> Vec<String> {
        self.registrations.keys().cloned().collect()
    }

    /// Handle a periodic sync event fired at `now_ms`.
    pub async fn fire(&mut self, tag: &str, now_ms: u64) -> SyncOutcome {
        let Some(registration) = self.registrations.get_mut(tag) else {
            log::debug!("[SW] periodic sync for unknown tag '{}'", tag);
            return SyncOutcome::UnknownTag;
        };
        if !registration.is_due(now_ms) {
            return SyncOutcome::TooSoon;
        }
        registration.last_fired_at = Some(now_ms);

        if tag == UPDATE_CONTENT_TAG {
            update_content().await;
            SyncOutcome::ContentRefreshed
        } else {
            SyncOutcome::Ignored
        }
    }
}

/// Content refresh hook. Present but inert.
async fn update_content() {
    log::info!("[SW] Background sync triggered");
}
