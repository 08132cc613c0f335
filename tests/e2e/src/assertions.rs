//! Test assertions
//!
//! Scenario-level checks that report what went wrong instead of panicking,
//! so a scenario can collect several before failing.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use council_offline::service_worker::{CacheStorage, FetchResult, FetchSource, Request};
use council_search::SearchMatch;

use crate::harness::url;

/// Assertion result
pub type AssertResult = Result<(), String>;

/// Assert a request was answered from `source` with `body`.
pub fn assert_served(result: &FetchResult, source: FetchSource, body: &str) -> AssertResult {
    match result {
        FetchResult::Response(r) if r.source == source && r.response.body == body.as_bytes() => Ok(()),
        FetchResult::Response(r) => Err(format!(
            "Expected {} body {:?}, got {} body {:?}",
            source.as_str(),
            body,
            r.source.as_str(),
            String::from_utf8_lossy(&r.response.body)
        )),
        other => Err(format!("Expected a response from {}, got {:?}", source.as_str(), other)),
    }
}

/// Assert a request failed because the network was unreachable.
pub fn assert_offline_error(result: &FetchResult) -> AssertResult {
    match result {
        FetchResult::Error(_) => Ok(()),
        other => Err(format!("Expected an offline error, got {:?}", other)),
    }
}

/// Assert a site path is stored in a generation.
pub fn assert_cached(caches: &CacheStorage, generation: &str, path: &str) -> AssertResult {
    match caches.match_in(generation, &Request::new(url(path))) {
        Some(_) => Ok(()),
        None => Err(format!("Expected {} to be cached in {}", path, generation)),
    }
}

/// Assert a site path is not stored in a generation.
pub fn assert_not_cached(caches: &CacheStorage, generation: &str, path: &str) -> AssertResult {
    match caches.match_in(generation, &Request::new(url(path))) {
        None => Ok(()),
        Some(_) => Err(format!("Expected {} not to be cached in {}", path, generation)),
    }
}

/// Assert exactly these generations exist.
pub fn assert_generations(caches: &CacheStorage, expected: &[&str]) -> AssertResult {
    let mut actual = caches.keys();
    actual.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| String::from(*s)).collect();
    expected.sort();
    if actual == expected {
        Ok(())
    } else {
        Err(format!("Expected generations {:?}, got {:?}", expected, actual))
    }
}

/// Assert the search results start with these ids, in order.
pub fn assert_ranked_first(results: &[SearchMatch<'_>], ids: &[&str]) -> AssertResult {
    let actual: Vec<&str> = results.iter().take(ids.len()).map(|m| m.entry.id.as_str()).collect();
    if actual == ids {
        Ok(())
    } else {
        Err(format!("Expected top results {:?}, got {:?}", ids, actual))
    }
}

/// Assert no two results share an entry.
pub fn assert_unique_entries(results: &[SearchMatch<'_>]) -> AssertResult {
    for (i, m) in results.iter().enumerate() {
        if results[..i].iter().any(|p| p.entry.id == m.entry.id) {
            return Err(format!("Entry {} appears more than once", m.entry.id));
        }
    }
    Ok(())
}
