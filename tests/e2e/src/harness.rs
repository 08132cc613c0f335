//! Site harness
//!
//! One council site as a browser would see it: the catalog and the
//! personalisation store behind the command palette, and an offline
//! controller sitting between pages and a scripted network.

use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;

use council_offline::service_worker::{
    CacheStorage, FetchResult, Request, ServiceWorkerError, ServiceWorkerId, ServiceWorkerRegistration,
};
use council_offline::OfflineConfig;
use council_search::{Catalog, CommandPalette, MemoryStore, UsageTracker};

use crate::fixtures::{CatalogFixtures, FakeNetwork, RecordingNotifier};

/// Origin every harness page lives on
pub const SITE_ORIGIN: &str = "https://council.example";

/// A council site wired to fakes
pub struct SiteHarness {
    pub catalog: Catalog,
    pub usage: UsageTracker<MemoryStore>,
    pub preferences: MemoryStore,
    pub palette: CommandPalette,
    pub network: Arc<FakeNetwork>,
    pub notifier: Arc<RecordingNotifier>,
    pub registration: ServiceWorkerRegistration,
}

impl SiteHarness {
    /// A site whose network serves app shell `version`, with no worker yet.
    pub fn new(version: &str) -> Self {
        Self::with_caches(version, CacheStorage::new())
    }

    /// Same, over the given cache storage (e.g. a small quota).
    pub fn with_caches(version: &str, caches: CacheStorage) -> Self {
        let network = Arc::new(FakeNetwork::with_app_shell(version));
        let notifier = Arc::new(RecordingNotifier::default());
        let registration = ServiceWorkerRegistration::new(network.clone(), notifier.clone(), caches.shared());
        Self {
            catalog: CatalogFixtures::district_council(),
            usage: UsageTracker::new(MemoryStore::new()),
            preferences: MemoryStore::new(),
            palette: CommandPalette::new(),
            network,
            notifier,
            registration,
        }
    }

    /// Deployment settings for a generation
    pub fn config(generation: &str) -> OfflineConfig {
        OfflineConfig {
            origin: SITE_ORIGIN.to_string(),
            generation: generation.to_string(),
            ..Default::default()
        }
    }

    /// Install (and possibly activate) a generation with default settings.
    pub async fn deploy(&mut self, generation: &str) -> Result<ServiceWorkerId, ServiceWorkerError> {
        self.registration.register(Self::config(generation)).await
    }

    /// Deploy a generation that waits for open pages to close.
    pub async fn deploy_waiting(&mut self, generation: &str) -> Result<ServiceWorkerId, ServiceWorkerError> {
        let config = OfflineConfig {
            skip_waiting_on_install: false,
            ..Self::config(generation)
        };
        self.registration.register(config).await
    }

    /// A subresource request for a site path
    pub async fn get(&self, path: &str) -> FetchResult {
        self.registration.handle_fetch(&Request::new(url(path))).await
    }

    /// A page navigation to a site path
    pub async fn navigate(&self, path: &str) -> FetchResult {
        self.registration.handle_fetch(&Request::navigate(url(path))).await
    }
}

/// Absolute URL of a site path
pub fn url(path: &str) -> alloc::string::String {
    format!("{}{}", SITE_ORIGIN, path)
}
