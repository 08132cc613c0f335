//! Command palette state
//!
//! One long-lived palette per page. Keyboard input, voice transcripts and
//! the open shortcut all drive the same instance.

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::{Catalog, EntryKind, ServiceEntry};
use crate::personalization::{UsageTracker, DEFAULT_TOP_TASKS};
use crate::search;
use crate::storage::KeyValueStore;

/// One row in the palette list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteItem {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub icon: String,
    pub url: String,
    /// `None` for default (unsearched) rows
    pub score: Option<u32>,
    /// Highlighted character positions in the matched field
    pub positions: Vec<usize>,
}

impl PaletteItem {
    fn from_entry(entry: &ServiceEntry) -> Self {
        Self {
            id: entry.id.clone(),
            kind: entry.kind,
            title: entry.title.clone(),
            icon: entry.icon.clone(),
            url: entry.url.clone(),
            score: None,
            positions: Vec::new(),
        }
    }
}

/// Palette state: open flag, current query, visible rows and selection.
#[derive(Debug, Clone, Default)]
pub struct CommandPalette {
    open: bool,
    query: String,
    items: Vec<PaletteItem>,
    selected: usize,
}

impl CommandPalette {
    /// Create a closed palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with an empty query, listing the default tasks.
    pub fn open<S: KeyValueStore>(&mut self, catalog: &Catalog, usage: &UsageTracker<S>) {
        self.open = true;
        self.set_query("", catalog, usage);
    }

    /// Close and clear the query.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.items.clear();
        self.selected = 0;
    }

    /// Open if closed, close if open.
    pub fn toggle<S: KeyValueStore>(&mut self, catalog: &Catalog, usage: &UsageTracker<S>) {
        if self.open {
            self.close();
        } else {
            self.open(catalog, usage);
        }
    }

    /// Open with a query already filled in, such as a voice transcript.
    pub fn open_with_query<S: KeyValueStore>(
        &mut self,
        query: &str,
        catalog: &Catalog,
        usage: &UsageTracker<S>,
    ) {
        self.open = true;
        self.set_query(query, catalog, usage);
    }

    /// Replace the query and refresh the rows. Selection goes back to the
    /// first row.
    pub fn set_query<S: KeyValueStore>(
        &mut self,
        query: &str,
        catalog: &Catalog,
        usage: &UsageTracker<S>,
    ) {
        self.query.clear();
        self.query.push_str(query);
        self.selected = 0;

        self.items = if query.trim().is_empty() {
            usage
                .top_tasks(catalog, DEFAULT_TOP_TASKS)
                .into_iter()
                .map(PaletteItem::from_entry)
                .collect()
        } else {
            search::search(query, catalog)
                .into_iter()
                .map(|m| PaletteItem {
                    score: Some(m.score),
                    positions: m.positions,
                    ..PaletteItem::from_entry(m.entry)
                })
                .collect()
        };
    }

    /// Move the selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move the selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    /// Activate the selected row: record its usage, close the palette and
    /// return the URL to navigate to.
    pub fn activate<S: KeyValueStore>(&mut self, usage: &mut UsageTracker<S>) -> Option<String> {
        let item = self.items.get(self.selected)?;
        let url = item.url.clone();
        usage.record_usage(&item.id);
        log::debug!("[Palette] activated {}", item.id);
        self.close();
        Some(url)
    }

    /// Whether the palette is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Visible rows.
    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    /// Index of the selected row.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<&PaletteItem> {
        self.items.get(self.selected)
    }
}
