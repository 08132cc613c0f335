//! Controller configuration
//!
//! Everything that changes between deployments: the cache generation name,
//! the precache manifest and the routing prefixes. Bumping `generation` (or
//! editing `manifest`) is how a redeploy invalidates old caches.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::service_worker::fetch::origin_of;
use crate::service_worker::ServiceWorkerError;

/// Offline controller settings for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    /// Site origin (`scheme://host[:port]`)
    pub origin: String,
    /// Cache generation name
    pub generation: String,
    /// Root-relative asset paths cached at install, in order
    pub manifest: Vec<String>,
    /// Paths with this prefix are served network-first
    pub api_prefix: String,
    /// Cached page served when a navigation fails offline
    pub offline_fallback: String,
    /// Activate straight after install instead of waiting for clients
    pub skip_waiting_on_install: bool,
    /// Notification title
    pub app_name: String,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            origin: "https://council.example".to_string(),
            generation: "council-v2.0.0".to_string(),
            manifest: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/styles.css".to_string(),
                "/script.js".to_string(),
                "/manifest.json".to_string(),
            ],
            api_prefix: "/api/".to_string(),
            offline_fallback: "/".to_string(),
            skip_waiting_on_install: true,
            app_name: "District Council".to_string(),
        }
    }
}

impl OfflineConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), ServiceWorkerError> {
        match origin_of(&self.origin) {
            None => return Err(invalid("origin must be an absolute URL")),
            Some(origin) if origin != self.origin() => {
                return Err(invalid("origin must not carry a path, query or fragment"))
            }
            Some(_) => {}
        }
        if self.generation.trim().is_empty() {
            return Err(invalid("generation must not be empty"));
        }
        if let Some(path) = self.manifest.iter().find(|p| !p.starts_with('/')) {
            return Err(ServiceWorkerError::InvalidConfig(alloc::format!(
                "manifest path '{}' is not root-relative",
                path
            )));
        }
        if !self.api_prefix.starts_with('/') {
            return Err(invalid("api_prefix must start with '/'"));
        }
        if !self.offline_fallback.starts_with('/') {
            return Err(invalid("offline_fallback must start with '/'"));
        }
        Ok(())
    }

    /// The origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }
}

fn invalid(msg: &str) -> ServiceWorkerError {
    ServiceWorkerError::InvalidConfig(msg.to_string())
}
