//! Service Worker Events
//!
//! Controller messages from pages, push messages and notification clicks.
//! Notification display and window management belong to the host and sit
//! behind [`Notifier`]; failures there are logged and never propagated.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::fetch::path_of;
use super::lifecycle::ServiceWorkerRegistration;
use super::ClientId;

/// Body used when a push carries no readable text
pub const DEFAULT_PUSH_BODY: &str = "New update available";
/// Notification icon
pub const NOTIFICATION_ICON: &str = "/icon-192.png";
/// Notification badge
pub const NOTIFICATION_BADGE: &str = "/badge-72.png";
/// Vibration pattern (ms on, off, on)
pub const NOTIFICATION_VIBRATE: [u32; 3] = [200, 100, 200];
/// Page opened from a notification
pub const NOTIFICATION_TARGET: &str = "/";

// ── Controller messages ─────────────────────────────────────

/// Fire-and-forget command sent by a page to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerMessage {
    /// Activate the waiting worker now
    SkipWaiting,
    /// Delete the active generation's cache
    ClearCache,
    /// Anything else; ignored
    Unknown(String),
}

#[derive(Deserialize)]
struct MessageEnvelope {
    #[serde(rename = "type")]
    kind: String,
}

impl ControllerMessage {
    /// Parse `{"type": "SKIP_WAITING"}`, a JSON string, or a bare type name.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let kind = if raw.starts_with('{') {
            match serde_json::from_str::<MessageEnvelope>(raw) {
                Ok(envelope) => envelope.kind,
                Err(_) => return Self::Unknown(raw.to_string()),
            }
        } else if raw.starts_with('"') {
            match serde_json::from_str::<String>(raw) {
                Ok(kind) => kind,
                Err(_) => return Self::Unknown(raw.to_string()),
            }
        } else {
            raw.to_string()
        };

        match kind.as_str() {
            "SKIP_WAITING" => Self::SkipWaiting,
            "CLEAR_CACHE" => Self::ClearCache,
            _ => Self::Unknown(kind),
        }
    }
}

// ── Push ────────────────────────────────────────────────────

/// Push event data
#[derive(Debug, Clone, Default)]
pub struct PushEvent {
    /// Raw payload
    data: Option<Vec<u8>>,
    /// Arrival time supplied by the host (ms since epoch)
    arrived_at: u64,
}

impl PushEvent {
    /// Create new push event
    pub fn new(data: Option<Vec<u8>>, arrived_at: u64) -> Self {
        Self { data, arrived_at }
    }

    /// Get data
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Payload as text, if present and valid UTF-8
    pub fn text(&self) -> Option<&str> {
        self.data.as_deref().and_then(|d| core::str::from_utf8(d).ok())
    }

    /// Arrival time
    pub fn arrived_at(&self) -> u64 {
        self.arrived_at
    }
}

/// A button on a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

impl NotificationAction {
    fn new(action: &str, title: &str, icon: &str) -> Self {
        Self {
            action: action.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Data attached to a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub date_of_arrival: u64,
    pub primary_key: u32,
}

/// Options for showing a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
}

impl NotificationOptions {
    /// Options for an incoming push.
    ///
    /// An empty, missing or non-UTF-8 payload gets the default body.
    pub fn for_push(event: &PushEvent) -> Self {
        let body = match event.text() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => DEFAULT_PUSH_BODY.to_string(),
        };
        Self {
            body,
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            vibrate: NOTIFICATION_VIBRATE.to_vec(),
            data: NotificationData {
                date_of_arrival: event.arrived_at(),
                primary_key: 1,
            },
            actions: vec![
                NotificationAction::new("view", "View", "/icons/view.png"),
                NotificationAction::new("close", "Close", "/icons/close.png"),
            ],
        }
    }
}

// ── Notification click ──────────────────────────────────────

/// Notification click event
#[derive(Debug, Clone, Default)]
pub struct NotificationClickEvent {
    /// Action button clicked, `None` for the notification body
    action: Option<String>,
    /// Notification tag
    tag: Option<String>,
}

impl NotificationClickEvent {
    /// Create new notification click event
    pub fn new() -> Self {
        Self::default()
    }

    /// Set action
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set notification tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Get action
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Get notification tag
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether this click should bring up the site. Only the `view`
    /// button does; a click on the body just closes the notification.
    pub fn opens_site(&self) -> bool {
        self.action() == Some("view")
    }
}

/// What a notification click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An open page was focused
    Focused(ClientId),
    /// A new window was opened
    Opened,
    /// Only dismissed
    Dismissed,
}

// ── Host boundary ───────────────────────────────────────────

/// Host notification failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Notifications not permitted
    PermissionDenied,
    /// Any other host failure
    Failed(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::PermissionDenied => write!(f, "notification permission denied"),
            NotifyError::Failed(msg) => write!(f, "notification failed: {}", msg),
        }
    }
}

/// Host notification and window management.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show_notification(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<(), NotifyError>;

    async fn close_notification(&self, tag: Option<&str>) -> Result<(), NotifyError>;

    async fn focus_client(&self, client: ClientId) -> Result<(), NotifyError>;

    async fn open_window(&self, url: &str) -> Result<(), NotifyError>;
}

// ── Handlers ────────────────────────────────────────────────

impl ServiceWorkerRegistration {
    /// Show a notification for a push message.
    pub async fn handle_push(&self, event: &PushEvent) {
        log::info!("[SW] Push notification received");
        let options = NotificationOptions::for_push(event);
        if let Err(e) = self.notifier.show_notification(self.app_name(), &options).await {
            log::warn!("[SW] could not show notification: {}", e);
        }
    }

    /// Close the clicked notification and, for `view`, bring up the home
    /// page: focus an open one or open a new window.
    pub async fn handle_notification_click(&self, event: &NotificationClickEvent) -> ClickOutcome {
        log::info!("[SW] Notification clicked: {:?}", event.action());
        if let Err(e) = self.notifier.close_notification(event.tag()).await {
            log::warn!("[SW] could not close notification: {}", e);
        }
        if !event.opens_site() {
            return ClickOutcome::Dismissed;
        }

        let existing = self
            .clients()
            .find(|c| path_of(&c.url) == NOTIFICATION_TARGET)
            .map(|c| c.id);

        if let Some(id) = existing {
            match self.notifier.focus_client(id).await {
                Ok(()) => return ClickOutcome::Focused(id),
                Err(e) => log::warn!("[SW] could not focus client: {}", e),
            }
        }

        match self.notifier.open_window(NOTIFICATION_TARGET).await {
            Ok(()) => ClickOutcome::Opened,
            Err(e) => {
                log::warn!("[SW] could not open window: {}", e);
                ClickOutcome::Dismissed
            }
        }
    }
}
