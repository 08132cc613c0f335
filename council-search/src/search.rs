//! Catalog search and ranking
//!
//! Scores every catalog entry against a free-text query and returns the
//! best matches, highest score first.

use alloc::vec::Vec;

use crate::catalog::{Catalog, MatchField, ServiceEntry};
use crate::fuzzy::{fuzzy_match, FuzzyMatch};

/// Maximum number of results returned by [`search`].
pub const DEFAULT_LIMIT: usize = 8;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch<'a> {
    /// The matched catalog entry
    pub entry: &'a ServiceEntry,
    /// Best score over all of the entry's fields
    pub score: u32,
    /// Matched positions in the best field
    pub positions: Vec<usize>,
    /// The field that produced the best score
    pub field: MatchField,
}

/// Search the catalog with the default result limit.
pub fn search<'a>(query: &str, catalog: &'a Catalog) -> Vec<SearchMatch<'a>> {
    search_with_limit(query, catalog, DEFAULT_LIMIT)
}

/// Search the catalog, keeping at most `limit` results.
///
/// A blank query returns nothing; showing a default list is up to the
/// caller. Entries with equal scores keep their catalog order.
pub fn search_with_limit<'a>(
    query: &str,
    catalog: &'a Catalog,
    limit: usize,
) -> Vec<SearchMatch<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchMatch<'a>> = catalog
        .entries()
        .iter()
        .filter_map(|entry| match_entry(query, entry))
        .collect();

    // `sort_by` is stable, so ties stay in catalog order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);

    log::trace!("[Search] '{}' -> {} results", query, results.len());
    results
}

/// Match a query against every searchable field of one entry.
///
/// The entry matches when any field does. Its score is the best score over
/// all fields, partial matches included; `positions` and `field` come from
/// the best field that matched in full.
pub fn match_entry<'a>(query: &str, entry: &'a ServiceEntry) -> Option<SearchMatch<'a>> {
    let mut score = 0;
    let mut best: Option<(MatchField, FuzzyMatch)> = None;

    for (field, text) in entry.searchable_fields() {
        let m = fuzzy_match(query, text);
        score = score.max(m.score);
        if !m.matched {
            continue;
        }
        let better = match &best {
            Some((_, current)) => m.score > current.score,
            None => true,
        };
        if better {
            best = Some((field, m));
        }
    }

    best.map(|(field, m)| SearchMatch {
        entry,
        score,
        positions: m.positions,
        field,
    })
}
