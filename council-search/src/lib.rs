//! Council Search
//!
//! Client-side core of the council service directory: a fuzzy subsequence
//! matcher, the immutable service catalog it ranks, and the small amount of
//! state around it (usage-based personalization, the command palette and
//! the theme preference).
//!
//! # Architecture
//!
//! - `fuzzy`: Subsequence matcher with position-weighted scoring
//! - `catalog`: Validated, immutable service catalog (tasks + categories)
//! - `search`: Ranking over the catalog, top `DEFAULT_LIMIT` results
//! - `storage`: Key-value store abstraction with an in-memory backend
//! - `personalization`: Task usage counters and default task ordering
//! - `palette`: Long-lived command palette state machine
//! - `theme`: Auto/light/dark preference and `theme-color` value

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod catalog;
pub mod fuzzy;
pub mod palette;
pub mod personalization;
pub mod search;
pub mod storage;
pub mod theme;

pub use catalog::{Catalog, CatalogConfig, CatalogError, EntryKind, MatchField, NewsItem, PopularLink, ServiceEntry};
pub use fuzzy::{fuzzy_match, FuzzyMatch};
pub use palette::{CommandPalette, PaletteItem};
pub use personalization::UsageTracker;
pub use search::{search, search_with_limit, SearchMatch, DEFAULT_LIMIT};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use theme::{Theme, ThemePreference};
