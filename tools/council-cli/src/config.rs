//! Site configuration loading.
//!
//! A site config is one TOML document: an `[offline]` table with the
//! controller settings and `[[tasks]]`, `[[categories]]`, `[[popular]]` and
//! `[[news]]` arrays for the catalog. The district council's config is
//! compiled in and used when no `--config` is given.

use std::fs;
use std::path::Path;

use council_offline::OfflineConfig;
use council_search::{Catalog, CatalogConfig, NewsItem, PopularLink, ServiceEntry};
use serde::{Deserialize, Serialize};

use crate::error::CouncilError;

/// The built-in district council config.
pub const DEFAULT_CONFIG: &str = include_str!("../config/council.toml");

// ── Data models ──────────────────────────────────────────────────────

/// A site config as written in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub offline: OfflineConfig,
    #[serde(default)]
    pub tasks: Vec<ServiceEntry>,
    #[serde(default)]
    pub categories: Vec<ServiceEntry>,
    #[serde(default)]
    pub popular: Vec<PopularLink>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// A validated site: immutable catalog plus checked offline settings.
#[derive(Debug, Clone)]
pub struct Site {
    pub catalog: Catalog,
    pub offline: OfflineConfig,
}

// ── Loading ──────────────────────────────────────────────────────────

/// Parse a site config from TOML text.
pub fn parse(text: &str) -> Result<SiteConfig, CouncilError> {
    Ok(toml::from_str(text)?)
}

/// Read a site config file.
pub fn load_file(path: &Path) -> Result<SiteConfig, CouncilError> {
    if !path.exists() {
        return Err(CouncilError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Load the given config file, or the built-in one.
pub fn load(path: Option<&Path>) -> Result<Site, CouncilError> {
    let config = match path {
        Some(path) => {
            log::debug!("loading site config from {}", path.display());
            load_file(path)?
        }
        None => parse(DEFAULT_CONFIG)?,
    };
    config.validate()
}

impl SiteConfig {
    /// Check both halves and build the catalog.
    pub fn validate(self) -> Result<Site, CouncilError> {
        self.offline
            .validate()
            .map_err(|e| CouncilError::InvalidOffline(e.to_string()))?;

        let catalog = CatalogConfig {
            tasks: self.tasks,
            categories: self.categories,
            popular: self.popular,
            news: self.news,
        }
        .build()
        .map_err(|e| CouncilError::InvalidCatalog(e.to_string()))?;

        Ok(Site {
            catalog,
            offline: self.offline,
        })
    }
}
