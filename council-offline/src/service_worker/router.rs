//! Request routing policy
//!
//! - Cross-origin requests are not intercepted.
//! - Same-origin paths under the API prefix are network-first: fresh data
//!   when online, the last good copy when not.
//! - Everything else is cache-first: the precached shell is served without
//!   touching the network, and misses are cached on the way back.
//!
//! Lookups only ever read the serving worker's own generation.

use alloc::string::String;

use spin::RwLock;

use super::cache::CacheStorage;
use super::fetch::{
    is_same_origin, path_of, resolve, FetchError, FetchResponse, FetchResult, FetchSource, Request,
    RequestMethod, Response, ResponseType,
};
use super::network::Network;
use crate::config::OfflineConfig;

/// Strategy chosen for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStrategy {
    /// Not intercepted
    Passthrough,
    /// Network, then cache on failure
    NetworkFirst,
    /// Cache, then network on miss
    CacheFirst,
}

impl RouteStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStrategy::Passthrough => "passthrough",
            RouteStrategy::NetworkFirst => "network-first",
            RouteStrategy::CacheFirst => "cache-first",
        }
    }
}

/// Pick the strategy for a request.
pub fn classify(config: &OfflineConfig, request: &Request) -> RouteStrategy {
    if !is_same_origin(&request.url, config.origin()) {
        return RouteStrategy::Passthrough;
    }
    if path_of(&request.url).starts_with(config.api_prefix.as_str()) {
        RouteStrategy::NetworkFirst
    } else {
        RouteStrategy::CacheFirst
    }
}

/// Whether a network response may be stored for this request.
pub fn is_cacheable(request: &Request, response: &Response) -> bool {
    request.method == RequestMethod::Get
        && response.ok()
        && response.response_type != ResponseType::Opaque
}

/// Everything a strategy needs to serve one request.
pub struct RouteContext<'a> {
    pub config: &'a OfflineConfig,
    pub network: &'a dyn Network,
    pub caches: &'a RwLock<CacheStorage>,
}

impl<'a> RouteContext<'a> {
    /// Serve a request according to the policy.
    pub async fn route(&self, request: &Request) -> FetchResult {
        let strategy = classify(self.config, request);
        if strategy == RouteStrategy::Passthrough {
            log::trace!("[SW] passthrough {}", request.url);
            return FetchResult::Passthrough;
        }

        let request = Request {
            url: resolve(self.config.origin(), &request.url),
            ..request.clone()
        };
        match strategy {
            RouteStrategy::NetworkFirst => self.network_first(&request).await,
            _ => self.cache_first(&request).await,
        }
    }

    /// Network first; on success store a copy, on failure serve the stored
    /// copy if there is one.
    pub async fn network_first(&self, request: &Request) -> FetchResult {
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store(request, &response);
                respond(response, FetchSource::Network)
            }
            Err(cause) => {
                let cached = self.lookup(request);
                match cached {
                    Some(response) => {
                        log::info!("[SW] {} offline, serving cached copy", request.url);
                        respond(response, FetchSource::Cache)
                    }
                    None => FetchResult::Error(FetchError::Offline {
                        url: request.url.clone(),
                        cause,
                    }),
                }
            }
        }
    }

    /// Cache first; on a miss fetch and store. A failed page load falls
    /// back to the cached offline page.
    pub async fn cache_first(&self, request: &Request) -> FetchResult {
        let cached = self.lookup(request);
        if let Some(response) = cached {
            return respond(response, FetchSource::Cache);
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                self.store(request, &response);
                respond(response, FetchSource::Network)
            }
            Err(cause) => {
                let fallback = if request.is_document() {
                    self.offline_page()
                } else {
                    None
                };
                match fallback {
                    Some(page) => {
                        log::info!("[SW] {} offline, serving offline page", request.url);
                        respond(page, FetchSource::OfflineFallback)
                    }
                    None => FetchResult::Error(FetchError::Offline {
                        url: request.url.clone(),
                        cause,
                    }),
                }
            }
        }
    }

    fn lookup(&self, request: &Request) -> Option<Response> {
        self.caches.read().match_in(&self.config.generation, request)
    }

    fn offline_page(&self) -> Option<Response> {
        let url: String = resolve(self.config.origin(), &self.config.offline_fallback);
        self.lookup(&Request::new(url))
    }

    /// Store a response if policy allows. Storage failures only lose the
    /// copy, the response is still served.
    fn store(&self, request: &Request, response: &Response) {
        if !is_cacheable(request, response) {
            return;
        }
        let result = self
            .caches
            .write()
            .put(&self.config.generation, request.clone(), response.clone());
        if let Err(e) = result {
            log::warn!("[SW] not caching {}: {}", request.url, e);
        }
    }
}

fn respond(response: Response, source: FetchSource) -> FetchResult {
    FetchResult::Response(FetchResponse { response, source })
}
