//! Task usage personalization
//!
//! Counts how often each task is selected and surfaces the most used tasks
//! first. Counts live in a [`KeyValueStore`] as a JSON object mapping task
//! id to count.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::catalog::{Catalog, ServiceEntry};
use crate::storage::{self, KeyValueStore, USAGE_KEY};

/// Number of tasks shown when nothing has been typed yet.
pub const DEFAULT_TOP_TASKS: usize = 6;

/// Usage counters backed by a key-value store.
pub struct UsageTracker<S: KeyValueStore> {
    store: S,
    counts: BTreeMap<String, u32>,
}

impl<S: KeyValueStore> UsageTracker<S> {
    /// Load counters from `store`.
    ///
    /// Missing, unreadable or corrupted data starts from empty counts.
    pub fn new(store: S) -> Self {
        let counts = storage::read_logged(&store, USAGE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(counts) => Some(counts),
                Err(e) => {
                    log::warn!("[Usage] discarding corrupted usage data: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self { store, counts }
    }

    /// Record one selection of task `id` and persist the counters.
    ///
    /// Persistence failures are logged; the in-memory count still moves.
    pub fn record_usage(&mut self, id: &str) {
        let count = self.counts.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        log::debug!("[Usage] {} -> {}", id, count);
        self.persist();
    }

    /// Number of recorded selections of task `id`.
    pub fn usage_count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// All counters.
    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    /// The `count` tasks to show by default.
    ///
    /// Used tasks come first, most used first (ties in catalog order), then
    /// the remaining tasks in catalog order. Ids that are not tasks in
    /// `catalog` are ignored.
    pub fn top_tasks<'a>(&self, catalog: &'a Catalog, count: usize) -> Vec<&'a ServiceEntry> {
        let mut used: Vec<(&ServiceEntry, u32)> = catalog
            .tasks()
            .iter()
            .map(|task| (task, self.usage_count(&task.id)))
            .filter(|(_, uses)| *uses > 0)
            .collect();
        used.sort_by(|a, b| b.1.cmp(&a.1));

        let mut top: Vec<&ServiceEntry> = used.into_iter().map(|(task, _)| task).collect();
        for task in catalog.tasks() {
            if top.len() >= count {
                break;
            }
            if self.usage_count(&task.id) == 0 {
                top.push(task);
            }
        }
        top.truncate(count);
        top
    }

    /// Forget all counters.
    pub fn reset(&mut self) {
        self.counts.clear();
        storage::remove_logged(&mut self.store, USAGE_KEY);
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.counts) {
            Ok(json) => {
                storage::write_logged(&mut self.store, USAGE_KEY, &json);
            }
            Err(e) => log::warn!("[Usage] failed to encode usage data: {}", e),
        }
    }
}
