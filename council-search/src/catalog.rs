//! Service Catalog
//!
//! The fixed set of service entries the search engine ranks, plus the
//! display-only popular links and news items that travel with it.
//! A catalog is validated once and never changes afterwards.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Entry category, used for display partitioning only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A single transactional task ("Pay Council Tax")
    Task,
    /// A service area landing page ("Housing")
    Category,
}

impl EntryKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Category => "category",
        }
    }
}

/// Which searchable field of an entry produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Keywords,
    Description,
}

/// A searchable service entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Stable identifier, unique across the catalog
    pub id: String,
    /// Filled in from the section the entry is declared in
    #[serde(skip, default = "default_kind")]
    pub kind: EntryKind,
    /// Display name (tasks call it `label`)
    #[serde(alias = "label")]
    pub title: String,
    /// Navigation target
    pub url: String,
    /// Display glyph
    #[serde(default)]
    pub icon: String,
    /// Extra search terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_kind() -> EntryKind {
    EntryKind::Task
}

impl ServiceEntry {
    /// Create a task entry.
    pub fn task(id: &str, icon: &str, title: &str, url: &str, keywords: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: EntryKind::Task,
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            keywords: Some(keywords.to_string()),
            description: None,
        }
    }

    /// Create a category entry.
    pub fn category(id: &str, icon: &str, title: &str, url: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: EntryKind::Category,
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            keywords: None,
            description: Some(description.to_string()),
        }
    }

    /// Text fields eligible for matching, in priority order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = (MatchField, &str)> + '_ {
        [
            (MatchField::Title, Some(self.title.as_str())),
            (MatchField::Keywords, self.keywords.as_deref()),
            (MatchField::Description, self.description.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, text)| text.map(|t| (field, t)))
    }
}

/// A popular link shown under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

/// A news article teaser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    pub title: String,
    pub excerpt: String,
    pub url: String,
}

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share an id
    DuplicateId(String),
    /// An entry has an empty id
    EmptyId,
    /// An entry has no navigation target
    MissingUrl(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate catalog id: {}", id),
            CatalogError::EmptyId => write!(f, "catalog entry with empty id"),
            CatalogError::MissingUrl(id) => write!(f, "catalog entry {} has no url", id),
        }
    }
}

/// Raw catalog sections as they appear in configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub tasks: Vec<ServiceEntry>,
    #[serde(default)]
    pub categories: Vec<ServiceEntry>,
    #[serde(default)]
    pub popular: Vec<PopularLink>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

impl CatalogConfig {
    /// Validate into an immutable catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.tasks, self.categories, self.popular, self.news)
    }
}

/// The validated, immutable service catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Tasks followed by categories
    entries: Vec<ServiceEntry>,
    /// Number of leading entries that are tasks
    task_count: usize,
    popular: Vec<PopularLink>,
    news: Vec<NewsItem>,
}

impl Catalog {
    /// Build a catalog, checking id uniqueness across tasks and categories.
    ///
    /// The `kind` of every entry is taken from the section it was passed in.
    pub fn new(
        tasks: Vec<ServiceEntry>,
        categories: Vec<ServiceEntry>,
        popular: Vec<PopularLink>,
        news: Vec<NewsItem>,
    ) -> Result<Self, CatalogError> {
        let task_count = tasks.len();
        let mut entries = Vec::with_capacity(tasks.len() + categories.len());
        entries.extend(tasks.into_iter().map(|mut e| {
            e.kind = EntryKind::Task;
            e
        }));
        entries.extend(categories.into_iter().map(|mut e| {
            e.kind = EntryKind::Category;
            e
        }));

        check_entries(&entries)?;

        log::debug!(
            "[Search] Catalog loaded: {} tasks, {} categories",
            task_count,
            entries.len() - task_count
        );

        Ok(Self {
            entries,
            task_count,
            popular,
            news,
        })
    }

    /// All searchable entries in catalog order (tasks, then categories).
    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    /// Task entries only.
    pub fn tasks(&self) -> &[ServiceEntry] {
        &self.entries[..self.task_count]
    }

    /// Category entries only.
    pub fn categories(&self) -> &[ServiceEntry] {
        &self.entries[self.task_count..]
    }

    /// Popular links (display only).
    pub fn popular(&self) -> &[PopularLink] {
        &self.popular
    }

    /// News items (display only).
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Look up any entry by id.
    pub fn get(&self, id: &str) -> Option<&ServiceEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up a task by id.
    pub fn task(&self, id: &str) -> Option<&ServiceEntry> {
        self.tasks().iter().find(|e| e.id == id)
    }

    /// Number of searchable entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no searchable entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ids must be non-empty and unique, and every entry needs a url.
fn check_entries(entries: &[ServiceEntry]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if entry.url.is_empty() {
            return Err(CatalogError::MissingUrl(entry.id.clone()));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(CatalogError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}
