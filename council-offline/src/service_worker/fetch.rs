//! Fetch types
//!
//! Requests and responses as seen by the controller, the outcome of
//! intercepting one request, and the small amount of URL handling the
//! routing policy needs.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::network::NetworkError;

/// Request method. Only GET is ever cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Parse a method name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        [Self::Get, Self::Head, Self::Post, Self::Put, Self::Delete]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }
}

/// What the request is for. Only `Document` changes routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestDestination {
    #[default]
    Empty,
    Document,
    Font,
    Image,
    Manifest,
    Script,
    Style,
}

/// An intercepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Absolute or root-relative URL
    pub url: String,
    pub method: RequestMethod,
    pub destination: RequestDestination,
}

impl Request {
    /// A GET for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RequestMethod::Get,
            destination: RequestDestination::Empty,
        }
    }

    /// A page navigation
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::new(url).with_destination(RequestDestination::Document)
    }

    pub fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_destination(mut self, destination: RequestDestination) -> Self {
        self.destination = destination;
        self
    }

    /// Whether this request loads a page
    pub fn is_document(&self) -> bool {
        self.destination == RequestDestination::Document
    }
}

/// How much of a response the page may see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Same-origin
    #[default]
    Basic,
    Cors,
    Error,
    /// Cross-origin no-cors; status and body are hidden
    Opaque,
}

/// A response, from the network or from cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub response_type: ResponseType,
    /// Final URL, empty for synthesized responses
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// An empty body with `status`
    pub fn new(status: u16) -> Self {
        Self {
            response_type: ResponseType::Basic,
            url: String::new(),
            status,
            body: Vec::new(),
        }
    }

    /// A 200 carrying `body`
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Self::new(200)
        }
    }

    pub fn opaque() -> Self {
        Self {
            response_type: ResponseType::Opaque,
            ..Self::new(0)
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body size in bytes
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

// ── Interception result ─────────────────────────────────────

/// Result of intercepting a fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The controller produced a response.
    Response(FetchResponse),
    /// Not handled; the page fetches it directly.
    Passthrough,
    /// The request failed and no fallback exists.
    Error(FetchError),
}

impl FetchResult {
    /// The response, if any
    pub fn response(&self) -> Option<&Response> {
        match self {
            FetchResult::Response(r) => Some(&r.response),
            _ => None,
        }
    }

    /// Where the response came from, if any
    pub fn source(&self) -> Option<FetchSource> {
        match self {
            FetchResult::Response(r) => Some(r.source),
            _ => None,
        }
    }
}

/// A response together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub response: Response,
    pub source: FetchSource,
}

/// Indicates where a fetch response originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// The active cache generation
    Cache,
    /// The network
    Network,
    /// The cached offline page, served for a failed navigation
    OfflineFallback,
}

impl FetchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchSource::Cache => "cache",
            FetchSource::Network => "network",
            FetchSource::OfflineFallback => "offline-fallback",
        }
    }
}

/// A failed interception
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failed and nothing usable was cached
    Offline { url: String, cause: NetworkError },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Offline { url, cause } => {
                write!(f, "{} unavailable offline: {}", url, cause)
            }
        }
    }
}

// ── URL helpers ─────────────────────────────────────────────

/// The `scheme://host[:port]` part of an absolute URL, or `None` for
/// relative URLs.
pub fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return None;
    }
    let host_start = scheme_end + 3;
    let host_end = url[host_start..]
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .map(|i| host_start + i)
        .unwrap_or(url.len());
    Some(&url[..host_end])
}

/// The path of a URL without query or fragment. Never empty.
pub fn path_of(url: &str) -> &str {
    let rest = match origin_of(url) {
        Some(origin) => &url[origin.len()..],
        None => url,
    };
    let end = rest.find(|c: char| c == '?' || c == '#').unwrap_or(rest.len());
    let path = &rest[..end];
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Whether `url` belongs to `origin`. Relative URLs always do.
pub fn is_same_origin(url: &str, origin: &str) -> bool {
    match origin_of(url) {
        Some(o) => o.eq_ignore_ascii_case(origin.trim_end_matches('/')),
        None => true,
    }
}

/// Resolve a root-relative URL against `origin`. Absolute URLs are
/// returned unchanged.
pub fn resolve(origin: &str, url: &str) -> String {
    if origin_of(url).is_some() {
        return url.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        format!("{}/{}", origin, url)
    }
}
