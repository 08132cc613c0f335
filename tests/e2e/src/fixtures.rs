//! Test fixtures and data factories
//!
//! Provides reusable test data and the host-side fakes the offline
//! controller talks to.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use async_trait::async_trait;
use council_offline::service_worker::fetch::path_of;
use council_offline::service_worker::{
    ClientId, NotificationOptions, Notifier, NotifyError, Network, NetworkError, Request, Response,
};
use council_search::{Catalog, NewsItem, PopularLink, ServiceEntry};
use spin::Mutex;

/// Catalog test fixtures
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// The district council's catalog.
    pub fn district_council() -> Catalog {
        let tasks = vec![
            ServiceEntry::task("bins", "🗑️", "Find my bin day", "/bins", "waste rubbish recycling collection"),
            ServiceEntry::task("report-bin", "⚠️", "Report a missed bin", "/report/missed-bin", "waste collection problem"),
            ServiceEntry::task("council-tax", "💷", "Pay Council Tax", "/pay/council-tax", "payment bill"),
            ServiceEntry::task("fly-tipping", "📍", "Report fly-tipping", "/report/fly-tipping", "waste dumping rubbish"),
            ServiceEntry::task("planning", "📋", "Check planning applications", "/planning/search", "building development"),
            ServiceEntry::task("housing", "🏠", "Apply for housing help", "/housing/apply", "homelessness register"),
            ServiceEntry::task("bulky-waste", "🛋️", "Book bulky waste", "/bulky-waste", "furniture collection"),
            ServiceEntry::task("business-rates", "🏢", "Pay business rates", "/pay/business-rates", "payment commercial"),
        ];
        let categories = vec![
            ServiceEntry::category(
                "service-bins",
                "♻️",
                "Bins and recycling",
                "/bins-recycling",
                "Collection days, missed bins, bulky waste, garden waste subscriptions",
            ),
            ServiceEntry::category(
                "service-council-tax",
                "💷",
                "Council Tax",
                "/council-tax",
                "Pay your bill, set up direct debit, apply for discounts and reductions",
            ),
            ServiceEntry::category(
                "service-housing",
                "🏠",
                "Housing",
                "/housing",
                "Housing register, homelessness help, housing options advice, council housing",
            ),
            ServiceEntry::category(
                "service-planning",
                "📋",
                "Planning",
                "/planning",
                "Search and comment on planning applications, planning decisions, submit an application",
            ),
            ServiceEntry::category(
                "service-environmental",
                "🛡️",
                "Environmental health",
                "/environmental-health",
                "Food hygiene, noise complaints, pest control, contaminated land, air quality",
            ),
            ServiceEntry::category(
                "service-parking",
                "🅿️",
                "Parking",
                "/parking",
                "Permits, car parks, blue badge applications, parking enforcement, season tickets",
            ),
        ];
        let popular = vec![PopularLink {
            id: "garden-waste".to_string(),
            label: "Renew garden waste subscription".to_string(),
            url: "/garden-waste/renew".to_string(),
        }];
        let news = vec![NewsItem {
            date: "2026-01-15".to_string(),
            title: "New recycling service begins next month".to_string(),
            excerpt: "From February, you will be able to recycle food waste in your green bin.".to_string(),
            url: "/news/food-waste-recycling".to_string(),
        }];

        // Fixture ids are unique; a failure here is a broken fixture.
        match Catalog::new(tasks, categories, popular, news) {
            Ok(catalog) => catalog,
            Err(e) => panic!("district council fixture is invalid: {}", e),
        }
    }
}

/// A scripted network.
///
/// Known paths answer with their scripted response, unknown paths with
/// 404. The whole network can be taken offline, and single paths can be
/// made to fail. Every request URL is logged.
#[derive(Default)]
pub struct FakeNetwork {
    routes: Mutex<BTreeMap<String, Response>>,
    broken: Mutex<Vec<String>>,
    offline: Mutex<bool>,
    log: Mutex<Vec<String>>,
}

impl FakeNetwork {
    /// Network serving the default app shell manifest
    pub fn with_app_shell(version: &str) -> Self {
        let network = Self::default();
        for path in ["/", "/index.html", "/styles.css", "/script.js", "/manifest.json"] {
            network.serve(path, &format!("{} {}", path, version));
        }
        network
    }

    /// Answer `path` with a 200 and this body
    pub fn serve(&self, path: &str, body: &str) {
        self.routes
            .lock()
            .insert(path.to_string(), Response::with_body(body.as_bytes().to_vec()));
    }

    /// Answer `path` with an arbitrary response
    pub fn serve_response(&self, path: &str, response: Response) {
        self.routes.lock().insert(path.to_string(), response);
    }

    /// Make requests for `path` fail at the transport level
    pub fn break_path(&self, path: &str) {
        self.broken.lock().push(path.to_string());
    }

    /// Take the whole network down or bring it back
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    /// Every URL requested so far
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Number of requests whose path is `path`
    pub fn request_count(&self, path: &str) -> usize {
        self.log.lock().iter().filter(|u| path_of(u) == path).count()
    }

    /// Forget the request log
    pub fn clear_log(&self) {
        self.log.lock().clear();
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        self.log.lock().push(request.url.clone());
        if *self.offline.lock() {
            return Err(NetworkError::Offline);
        }
        let path = path_of(&request.url);
        if self.broken.lock().iter().any(|p| p == path) {
            return Err(NetworkError::Failed(format!("connection reset on {}", path)));
        }
        let response = self.routes.lock().get(path).cloned();
        Ok(response.unwrap_or_else(|| Response::new(404)).with_url(request.url.clone()))
    }
}

/// Notification calls seen by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Show { title: String, body: String },
    Close(Option<String>),
    Focus(ClientId),
    Open(String),
}

/// Records every notifier call. Can be told to deny permission.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<NotifierCall>>,
    denied: Mutex<bool>,
}

impl RecordingNotifier {
    /// Calls so far, in order
    pub fn calls(&self) -> Vec<NotifierCall> {
        self.calls.lock().clone()
    }

    /// Deny or grant notification permission
    pub fn set_denied(&self, denied: bool) {
        *self.denied.lock() = denied;
    }

    fn check(&self) -> Result<(), NotifyError> {
        if *self.denied.lock() {
            Err(NotifyError::PermissionDenied)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn show_notification(&self, title: &str, options: &NotificationOptions) -> Result<(), NotifyError> {
        self.check()?;
        self.calls.lock().push(NotifierCall::Show {
            title: title.to_string(),
            body: options.body.clone(),
        });
        Ok(())
    }

    async fn close_notification(&self, tag: Option<&str>) -> Result<(), NotifyError> {
        self.calls.lock().push(NotifierCall::Close(tag.map(|t| t.to_string())));
        Ok(())
    }

    async fn focus_client(&self, client: ClientId) -> Result<(), NotifyError> {
        self.calls.lock().push(NotifierCall::Focus(client));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), NotifyError> {
        self.check()?;
        self.calls.lock().push(NotifierCall::Open(url.to_string()));
        Ok(())
    }
}
