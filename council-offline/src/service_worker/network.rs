//! Network boundary
//!
//! The host environment performs the actual HTTP fetches. The controller
//! only sees a response or a failure signal; there is no timeout of its own.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use async_trait::async_trait;

use super::fetch::{Request, Response};

/// Network failure as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// No connectivity
    Offline,
    /// The host gave up waiting
    Timeout,
    /// Any other transport failure
    Failed(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Offline => write!(f, "network offline"),
            NetworkError::Timeout => write!(f, "network timeout"),
            NetworkError::Failed(msg) => write!(f, "network failure: {}", msg),
        }
    }
}

/// Performs network fetches on behalf of the controller.
///
/// A completed HTTP exchange is `Ok` whatever its status; only transport
/// failures are `Err`.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError>;
}
