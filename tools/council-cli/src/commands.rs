//! Subcommand handlers.
//!
//! Each handler takes already-loaded inputs and returns a serializable
//! report; printing is left to `main`.

use chrono::Utc;
use council_offline::service_worker::fetch::{is_same_origin, resolve};
use council_offline::service_worker::router::{classify, RouteStrategy};
use council_offline::service_worker::{NotificationOptions, PushEvent, Request};
use council_search::{
    search_with_limit, EntryKind, KeyValueStore, MatchField, NewsItem, PopularLink, Theme, ThemePreference,
    UsageTracker,
};
use serde::Serialize;

use crate::cli::{RouteArgs, ThemeArgs};
use crate::config::Site;
use crate::error::CouncilError;

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub url: String,
    pub score: u32,
    pub field: MatchField,
    pub positions: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub url: String,
    pub uses: u32,
}

#[derive(Debug, Serialize)]
pub struct SelectReport {
    pub id: String,
    pub url: String,
    pub uses: u32,
    pub selected_at: String,
}

#[derive(Debug, Serialize)]
pub struct ResetReport {
    pub cleared: usize,
}

#[derive(Debug, Serialize)]
pub struct ThemeReport {
    pub theme: String,
    pub dark: bool,
    pub theme_color: String,
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub url: String,
    pub strategy: String,
    pub generation: String,
}

#[derive(Debug, Serialize)]
pub struct ManifestReport {
    pub generation: String,
    pub urls: Vec<String>,
    pub api_prefix: String,
    pub offline_fallback: String,
}

#[derive(Debug, Serialize)]
pub struct PushPreview {
    pub title: String,
    pub options: NotificationOptions,
}

#[derive(Debug, Serialize)]
pub struct HomeReport {
    pub popular: Vec<PopularLink>,
    pub news: Vec<NewsItem>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Rank the catalog against `query`.
pub fn search(site: &Site, query: &str, limit: usize) -> SearchReport {
    let results = search_with_limit(query, &site.catalog, limit)
        .into_iter()
        .map(|m| SearchHit {
            id: m.entry.id.clone(),
            kind: m.entry.kind,
            title: m.entry.title.clone(),
            url: m.entry.url.clone(),
            score: m.score,
            field: m.field,
            positions: m.positions,
        })
        .collect();
    SearchReport {
        query: query.to_string(),
        results,
    }
}

/// The default task list for the stored usage.
pub fn top_tasks<S: KeyValueStore>(site: &Site, usage: &UsageTracker<S>, count: usize) -> Vec<TaskRow> {
    usage
        .top_tasks(&site.catalog, count)
        .into_iter()
        .map(|task| TaskRow {
            id: task.id.clone(),
            icon: task.icon.clone(),
            title: task.title.clone(),
            url: task.url.clone(),
            uses: usage.usage_count(&task.id),
        })
        .collect()
}

/// Record a selection of entry `id`.
pub fn select<S: KeyValueStore>(
    site: &Site,
    usage: &mut UsageTracker<S>,
    id: &str,
) -> Result<SelectReport, CouncilError> {
    let entry = site
        .catalog
        .get(id)
        .ok_or_else(|| CouncilError::UnknownEntry { id: id.to_string() })?;
    usage.record_usage(&entry.id);
    log::info!("selected {}", entry.id);
    Ok(SelectReport {
        id: entry.id.clone(),
        url: entry.url.clone(),
        uses: usage.usage_count(&entry.id),
        selected_at: Utc::now().to_rfc3339(),
    })
}

/// Forget all usage counts.
pub fn reset_usage<S: KeyValueStore>(usage: &mut UsageTracker<S>) -> ResetReport {
    let cleared = usage.counts().len();
    usage.reset();
    ResetReport { cleared }
}

/// Show, set or cycle the stored theme.
pub fn theme<S: KeyValueStore>(
    preference: &mut ThemePreference<S>,
    args: &ThemeArgs,
) -> Result<ThemeReport, CouncilError> {
    let theme = if args.cycle {
        preference.cycle()
    } else if let Some(name) = &args.set {
        let theme: Theme = name
            .parse()
            .map_err(|_| CouncilError::UnknownTheme { name: name.clone() })?;
        preference.set(theme);
        theme
    } else {
        preference.current()
    };

    Ok(ThemeReport {
        theme: theme.as_str().to_string(),
        dark: theme.is_dark(args.system_dark),
        theme_color: theme.theme_color(args.system_dark).to_string(),
    })
}

/// Classify a URL the way the active controller would.
pub fn route(site: &Site, args: &RouteArgs) -> RouteReport {
    let request = if args.document {
        Request::navigate(args.url.as_str())
    } else {
        Request::new(args.url.as_str())
    };
    let strategy = classify(&site.offline, &request);
    let url = if strategy == RouteStrategy::Passthrough || !is_same_origin(&args.url, site.offline.origin()) {
        args.url.clone()
    } else {
        resolve(site.offline.origin(), &args.url)
    };
    RouteReport {
        url,
        strategy: strategy.as_str().to_string(),
        generation: site.offline.generation.clone(),
    }
}

/// The absolute URLs precached at install.
pub fn manifest(site: &Site) -> ManifestReport {
    let offline = &site.offline;
    ManifestReport {
        generation: offline.generation.clone(),
        urls: offline
            .manifest
            .iter()
            .map(|path| resolve(offline.origin(), path))
            .collect(),
        api_prefix: offline.api_prefix.clone(),
        offline_fallback: offline.offline_fallback.clone(),
    }
}

/// The notification a push with `body` would show.
pub fn push_preview(site: &Site, body: Option<&str>) -> PushPreview {
    let arrived_at = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let event = PushEvent::new(body.map(|b| b.as_bytes().to_vec()), arrived_at);
    PushPreview {
        title: site.offline.app_name.clone(),
        options: NotificationOptions::for_push(&event),
    }
}

/// Popular links and news for the home page.
pub fn home(site: &Site) -> HomeReport {
    HomeReport {
        popular: site.catalog.popular().to_vec(),
        news: site.catalog.news().to_vec(),
    }
}
