//! Service Worker Lifecycle Management
//!
//! A registration owns up to three worker versions: the one installing, the
//! one waiting and the active one. Each version is bound to one cache
//! generation. Install precaches the whole manifest or nothing; activation
//! purges every other generation and then takes control of open pages.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use futures_util::future::{join_all, try_join_all};

use super::cache::SharedCacheStorage;
use super::events::{ControllerMessage, Notifier};
use super::fetch::{resolve, FetchResult, Request};
use super::network::Network;
use super::router::RouteContext;
use super::sync::{PeriodicSyncRegistry, SyncOutcome};
use super::{is_valid_transition, ClientId, ServiceWorkerError, ServiceWorkerId, ServiceWorkerState};
use crate::config::OfflineConfig;

/// Lifecycle event, recorded in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A worker changed state
    StateChange {
        worker: ServiceWorkerId,
        from: ServiceWorkerState,
        to: ServiceWorkerState,
    },
    /// A stale generation was deleted during activation
    CachePurged(String),
    /// The active generation was deleted on request
    CacheCleared(String),
    /// Open pages are now controlled by this worker
    ControllerChange(ServiceWorkerId),
}

/// One worker version
#[derive(Debug, Clone)]
pub struct ServiceWorker {
    id: ServiceWorkerId,
    config: Arc<OfflineConfig>,
    state: ServiceWorkerState,
}

impl ServiceWorker {
    /// Create a new service worker
    pub fn new(config: OfflineConfig) -> Self {
        Self {
            id: ServiceWorkerId::new(),
            config: Arc::new(config),
            state: ServiceWorkerState::Parsed,
        }
    }

    /// Get the worker ID
    pub fn id(&self) -> ServiceWorkerId {
        self.id
    }

    /// Get current state
    pub fn state(&self) -> ServiceWorkerState {
        self.state
    }

    /// Cache generation this worker owns
    pub fn generation(&self) -> &str {
        &self.config.generation
    }

    /// Deployment settings
    pub fn config(&self) -> &OfflineConfig {
        &self.config
    }

    /// Check if the worker is active
    pub fn is_active(&self) -> bool {
        self.state == ServiceWorkerState::Activated
    }
}

/// An open page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub url: String,
    /// Worker controlling this page, if any
    pub controller: Option<ServiceWorkerId>,
}

/// Service Worker Registration
///
/// The controller for one site. Lifecycle operations take `&mut self` and
/// so never overlap; request handling takes `&self` and may run
/// concurrently.
pub struct ServiceWorkerRegistration {
    network: Arc<dyn Network>,
    pub(crate) notifier: Arc<dyn Notifier>,
    caches: SharedCacheStorage,
    installing: Option<ServiceWorker>,
    waiting: Option<ServiceWorker>,
    active: Option<ServiceWorker>,
    clients: BTreeMap<ClientId, Client>,
    periodic_sync: PeriodicSyncRegistry,
    events: Vec<LifecycleEvent>,
}

impl ServiceWorkerRegistration {
    /// Create a registration with no workers
    pub fn new(
        network: Arc<dyn Network>,
        notifier: Arc<dyn Notifier>,
        caches: SharedCacheStorage,
    ) -> Self {
        Self {
            network,
            notifier,
            caches,
            installing: None,
            waiting: None,
            active: None,
            clients: BTreeMap::new(),
            periodic_sync: PeriodicSyncRegistry::with_content_refresh(),
            events: Vec::new(),
        }
    }

    // ── Accessors ───────────────────────────────────────────

    /// Worker being installed
    pub fn installing(&self) -> Option<&ServiceWorker> {
        self.installing.as_ref()
    }

    /// Installed worker waiting to activate
    pub fn waiting(&self) -> Option<&ServiceWorker> {
        self.waiting.as_ref()
    }

    /// Active worker
    pub fn active(&self) -> Option<&ServiceWorker> {
        self.active.as_ref()
    }

    /// Shared cache storage
    pub fn caches(&self) -> &SharedCacheStorage {
        &self.caches
    }

    /// Open pages
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    /// Periodic sync registrations
    pub fn periodic_sync(&mut self) -> &mut PeriodicSyncRegistry {
        &mut self.periodic_sync
    }

    /// Lifecycle events so far
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Notification title of the current deployment
    pub fn app_name(&self) -> &str {
        self.active
            .as_ref()
            .or(self.waiting.as_ref())
            .map(|w| w.config.app_name.as_str())
            .unwrap_or("District Council")
    }

    // ── Install / activate ──────────────────────────────────

    /// Register and install a new worker version.
    ///
    /// The manifest is fetched in full before anything is stored; if any
    /// asset fails, or storing would exceed the quota, the new worker is
    /// redundant and whatever was serving before keeps serving. On success
    /// the worker activates at once when `skip_waiting_on_install` is set or
    /// no page is under control, and waits otherwise.
    pub async fn register(&mut self, config: OfflineConfig) -> Result<ServiceWorkerId, ServiceWorkerError> {
        config.validate()?;

        let mut worker = ServiceWorker::new(config);
        let id = worker.id();
        log::info!("[SW] Installing {} ({})", id.raw(), worker.generation());
        self.transition(&mut worker, ServiceWorkerState::Installing)?;
        self.installing = Some(worker);

        let result = self.precache().await;
        let Some(mut worker) = self.installing.take() else {
            return Err(ServiceWorkerError::NotFound);
        };

        if let Err(e) = result {
            log::error!("[SW] Install of {} failed: {}", worker.generation(), e);
            self.transition(&mut worker, ServiceWorkerState::Redundant)?;
            return Err(e);
        }
        self.transition(&mut worker, ServiceWorkerState::Installed)?;
        log::info!("[SW] Installed {}", worker.generation());

        if let Some(mut superseded) = self.waiting.take() {
            self.transition(&mut superseded, ServiceWorkerState::Redundant)?;
        }

        let activate_now = worker.config.skip_waiting_on_install
            || self.active.is_none()
            || self.controlled_clients() == 0;
        if activate_now {
            self.activate(worker).await?;
        } else {
            log::info!("[SW] {} waiting for open pages to close", worker.generation());
            self.waiting = Some(worker);
        }
        Ok(id)
    }

    /// Fetch every manifest asset, then store them all in one step.
    async fn precache(&self) -> Result<(), ServiceWorkerError> {
        let Some(worker) = self.installing.as_ref() else {
            return Err(ServiceWorkerError::NotFound);
        };
        let config = &worker.config;

        let requests: Vec<Request> = config
            .manifest
            .iter()
            .map(|path| Request::new(resolve(config.origin(), path)))
            .collect();

        let responses = try_join_all(requests.iter().map(|r| self.network.fetch(r)))
            .await
            .map_err(|e| ServiceWorkerError::InstallFailed(e.to_string()))?;

        if let Some((request, response)) = requests
            .iter()
            .zip(responses.iter())
            .find(|(_, response)| !response.ok())
        {
            return Err(ServiceWorkerError::InstallFailed(format!(
                "{} returned {}",
                request.url, response.status
            )));
        }

        self.caches
            .write()
            .populate(worker.generation(), requests.into_iter().zip(responses))
            .map_err(|e| ServiceWorkerError::InstallFailed(e.to_string()))
    }

    /// Promote an installed worker: purge all other generations, retire the
    /// previous active worker and claim every open page.
    async fn activate(&mut self, mut worker: ServiceWorker) -> Result<(), ServiceWorkerError> {
        self.transition(&mut worker, ServiceWorkerState::Activating)?;

        let stale: Vec<String> = self
            .caches
            .read()
            .keys()
            .into_iter()
            .filter(|name| name != worker.generation())
            .collect();
        let purged = join_all(stale.iter().map(|name| self.purge(name))).await;
        for name in purged.into_iter().flatten() {
            self.events.push(LifecycleEvent::CachePurged(name));
        }

        if let Some(mut previous) = self.active.take() {
            self.transition(&mut previous, ServiceWorkerState::Redundant)?;
        }
        self.transition(&mut worker, ServiceWorkerState::Activated)?;
        log::info!("[SW] Activated {}", worker.generation());

        let id = worker.id();
        self.active = Some(worker);
        self.claim(id);
        Ok(())
    }

    async fn purge(&self, name: &str) -> Option<String> {
        if self.caches.write().delete(name) {
            log::info!("[SW] Deleting old cache: {}", name);
            Some(name.to_string())
        } else {
            None
        }
    }

    /// Take control of every open page
    fn claim(&mut self, id: ServiceWorkerId) {
        for client in self.clients.values_mut() {
            client.controller = Some(id);
        }
        self.events.push(LifecycleEvent::ControllerChange(id));
    }

    /// Activate the waiting worker now. Returns whether there was one.
    pub async fn skip_waiting(&mut self) -> Result<bool, ServiceWorkerError> {
        match self.waiting.take() {
            Some(worker) => {
                self.activate(worker).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn transition(
        &mut self,
        worker: &mut ServiceWorker,
        to: ServiceWorkerState,
    ) -> Result<(), ServiceWorkerError> {
        let from = worker.state;
        if !is_valid_transition(from, to) {
            return Err(ServiceWorkerError::InvalidStateTransition { from, to });
        }
        worker.state = to;
        log::debug!("[SW] worker {}: {} -> {}", worker.id.raw(), from.as_str(), to.as_str());
        self.events.push(LifecycleEvent::StateChange {
            worker: worker.id,
            from,
            to,
        });
        Ok(())
    }

    // ── Clients ─────────────────────────────────────────────

    /// A page of the site opened. It is controlled by the active worker.
    pub fn client_opened(&mut self, url: &str) -> ClientId {
        let id = ClientId::new();
        let controller = self.active.as_ref().map(|w| w.id());
        self.clients.insert(
            id,
            Client {
                id,
                url: url.to_string(),
                controller,
            },
        );
        id
    }

    /// A page closed. Closing the last one lets a waiting worker activate.
    pub async fn client_closed(&mut self, id: ClientId) -> Result<(), ServiceWorkerError> {
        if self.clients.remove(&id).is_none() {
            return Ok(());
        }
        if self.clients.is_empty() && self.waiting.is_some() {
            self.skip_waiting().await?;
        }
        Ok(())
    }

    /// Number of pages controlled by some worker
    pub fn controlled_clients(&self) -> usize {
        self.clients.values().filter(|c| c.controller.is_some()).count()
    }

    // ── Requests and messages ───────────────────────────────

    /// Serve an intercepted request with the active worker's policy.
    /// Without an active worker nothing is intercepted.
    pub async fn handle_fetch(&self, request: &Request) -> FetchResult {
        let Some(active) = self.active.as_ref() else {
            return FetchResult::Passthrough;
        };
        let context = RouteContext {
            config: active.config(),
            network: self.network.as_ref(),
            caches: self.caches.as_ref(),
        };
        context.route(request).await
    }

    /// Handle a message posted by a page.
    pub async fn handle_message(&mut self, raw: &str) -> Result<ControllerMessage, ServiceWorkerError> {
        let message = ControllerMessage::parse(raw);
        match &message {
            ControllerMessage::SkipWaiting => {
                if !self.skip_waiting().await? {
                    log::debug!("[SW] SKIP_WAITING with no waiting worker");
                }
            }
            ControllerMessage::ClearCache => {
                self.clear_cache();
            }
            ControllerMessage::Unknown(kind) => {
                log::warn!("[SW] ignoring unknown message '{}'", kind);
            }
        }
        Ok(message)
    }

    /// Delete the active generation's cache. Returns whether it existed.
    pub fn clear_cache(&mut self) -> bool {
        let Some(generation) = self.active.as_ref().map(|w| w.generation().to_string()) else {
            return false;
        };
        let deleted = self.caches.write().delete(&generation);
        if deleted {
            log::info!("[SW] Cleared cache {}", generation);
            self.events.push(LifecycleEvent::CacheCleared(generation));
        }
        deleted
    }

    /// Handle a periodic sync event
    pub async fn handle_periodic_sync(&mut self, tag: &str, now_ms: u64) -> SyncOutcome {
        self.periodic_sync.fire(tag, now_ms).await
    }
}
