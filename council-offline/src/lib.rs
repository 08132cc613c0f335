//! Council Offline
//!
//! The site's offline cache controller. It precaches a fixed asset manifest
//! into a versioned cache generation, routes intercepted requests
//! (cache-first for the app shell, network-first under the API prefix) and
//! retires old generations when a new deployment activates. Push messages
//! and notification clicks are handled here too.
//!
//! # Architecture
//!
//! - `config`: Per-deployment settings (generation, manifest, prefixes)
//! - `service_worker::fetch`: Request/response types and URL helpers
//! - `service_worker::cache`: Named cache generations with a quota
//! - `service_worker::network`: Host network boundary
//! - `service_worker::router`: Routing policy and the two strategies
//! - `service_worker::lifecycle`: Registration state machine
//! - `service_worker::events`: Messages, push and notification clicks
//! - `service_worker::sync`: Periodic background sync

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod service_worker;

pub use config::OfflineConfig;
pub use service_worker::{
    CacheStorage, FetchResult, FetchSource, Network, NetworkError, Notifier, Request, Response,
    ServiceWorkerError, ServiceWorkerRegistration, ServiceWorkerState,
};
