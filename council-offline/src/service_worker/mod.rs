//! Service Worker Module
//!
//! The offline cache controller: one registration per site, a chain of
//! worker versions (installing, waiting, active), each bound to exactly one
//! cache generation, and the request routing policy the active worker
//! applies.

pub mod cache;
pub mod events;
pub mod fetch;
pub mod lifecycle;
pub mod network;
pub mod router;
pub mod sync;

pub use cache::{Cache, CacheError, CacheStorage, SharedCacheStorage};
pub use events::{
    ClickOutcome, ControllerMessage, NotificationAction, NotificationClickEvent, NotificationOptions, Notifier,
    NotifyError, PushEvent,
};
pub use fetch::{
    FetchError, FetchResponse, FetchResult, FetchSource, Request, RequestDestination, RequestMethod,
    Response, ResponseType,
};
pub use lifecycle::{Client, LifecycleEvent, ServiceWorker, ServiceWorkerRegistration};
pub use network::{Network, NetworkError};
pub use router::{classify, RouteContext, RouteStrategy};
pub use sync::{PeriodicSyncRegistry, SyncOutcome, UPDATE_CONTENT_TAG};

use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Service Worker global ID counter
static NEXT_SW_ID: AtomicU64 = AtomicU64::new(1);

/// Client ID counter
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// Service Worker states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceWorkerState {
    /// Created, install not started
    #[default]
    Parsed,
    /// Precaching the manifest
    Installing,
    /// Installed, waiting to activate
    Installed,
    /// Purging old generations
    Activating,
    /// Active and controlling pages
    Activated,
    /// Failed or replaced
    Redundant,
}

impl ServiceWorkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Activating => "activating",
            Self::Activated => "activated",
            Self::Redundant => "redundant",
        }
    }
}

/// Check if a state transition is valid
pub fn is_valid_transition(from: ServiceWorkerState, to: ServiceWorkerState) -> bool {
    use ServiceWorkerState::*;

    matches!(
        (from, to),
        // Normal lifecycle
        (Parsed, Installing) |
        (Installing, Installed) |
        (Installing, Redundant) |  // Install failed
        (Installed, Activating) |
        (Installed, Redundant) |   // Superseded while waiting
        (Activating, Activated) |
        (Activating, Redundant) |  // Activate failed
        (Activated, Redundant)     // Replaced by new worker
    )
}

/// Service Worker error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceWorkerError {
    /// Configuration rejected
    InvalidConfig(String),
    /// Precache failed; the worker is redundant
    InstallFailed(String),
    /// State transition invalid
    InvalidStateTransition {
        from: ServiceWorkerState,
        to: ServiceWorkerState,
    },
    /// No worker in the expected slot
    NotFound,
}

impl fmt::Display for ServiceWorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid offline config: {}", msg),
            Self::InstallFailed(msg) => write!(f, "install failed: {}", msg),
            Self::InvalidStateTransition { from, to } => {
                write!(f, "invalid transition {} -> {}", from.as_str(), to.as_str())
            }
            Self::NotFound => write!(f, "no such service worker"),
        }
    }
}

/// Service Worker ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceWorkerId(u64);

impl ServiceWorkerId {
    /// Create a new unique ID
    pub fn new() -> Self {
        Self(NEXT_SW_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get raw value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ServiceWorkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// An open page (window) of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    /// Create a new unique ID
    pub fn new() -> Self {
        Self(NEXT_CLIENT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get raw value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}
