//! E2E Test: PWA Offline Capability
//!
//! Tests that the offline controller keeps the site usable without a network:
//! 1. Install precaches the app shell
//! 2. Take the network down
//! 3. Shell assets and page loads are served from the cache
//! 4. API data falls back to the last good copy

#[cfg(test)]
mod tests {
    use council_e2e_tests::assertions::*;
    use council_e2e_tests::SiteHarness;
    use council_offline::service_worker::{FetchResult, FetchSource, Request, Response};
    use futures::executor::block_on;

    const MANIFEST: [&str; 5] = ["/", "/index.html", "/styles.css", "/script.js", "/manifest.json"];

    fn installed() -> SiteHarness {
        let mut site = SiteHarness::new("v1");
        block_on(site.deploy("council-v1")).unwrap();
        site.network.clear_log();
        site
    }

    #[test]
    fn test_install_precaches_whole_manifest() {
        let site = installed();
        let caches = site.registration.caches().read();
        for path in MANIFEST {
            assert_cached(&caches, "council-v1", path).unwrap();
        }
        assert_eq!(caches.get("council-v1").unwrap().len(), MANIFEST.len());
    }

    #[test]
    fn test_shell_served_offline() {
        let site = installed();
        site.network.set_offline(true);

        for path in MANIFEST {
            let result = block_on(site.get(path));
            assert_served(&result, FetchSource::Cache, &format!("{} v1", path)).unwrap();
        }
        // Cache hits never reach the network.
        assert!(site.network.requests().is_empty());
    }

    #[test]
    fn test_cache_first_ignores_broken_network() {
        let site = installed();
        site.network.break_path("/styles.css");
        site.network.serve("/script.js", "changed upstream");

        assert_served(&block_on(site.get("/styles.css")), FetchSource::Cache, "/styles.css v1").unwrap();
        assert_served(&block_on(site.get("/script.js")), FetchSource::Cache, "/script.js v1").unwrap();
        assert_eq!(site.network.request_count("/styles.css"), 0);
    }

    #[test]
    fn test_offline_navigation_gets_home_page() {
        let site = installed();
        site.network.set_offline(true);

        let result = block_on(site.navigate("/planning/search"));
        assert_served(&result, FetchSource::OfflineFallback, "/ v1").unwrap();

        // Only page loads get the fallback.
        assert_offline_error(&block_on(site.get("/images/logo.png"))).unwrap();
    }

    #[test]
    fn test_cache_miss_is_stored_for_later() {
        let site = installed();
        site.network.serve("/images/logo.png", "png");

        assert_served(&block_on(site.get("/images/logo.png")), FetchSource::Network, "png").unwrap();
        site.network.set_offline(true);
        assert_served(&block_on(site.get("/images/logo.png")), FetchSource::Cache, "png").unwrap();
    }

    #[test]
    fn test_error_responses_not_stored() {
        let site = installed();
        site.network.serve_response("/missing", Response::new(404));

        let result = block_on(site.get("/missing"));
        assert_eq!(result.response().unwrap().status, 404);
        assert_not_cached(&site.registration.caches().read(), "council-v1", "/missing").unwrap();
    }

    #[test]
    fn test_api_network_first_with_fallback() {
        let site = installed();
        site.network.serve("/api/bin-days", "monday");
        assert_served(&block_on(site.get("/api/bin-days")), FetchSource::Network, "monday").unwrap();

        // Fresh data wins while online.
        site.network.serve("/api/bin-days", "tuesday");
        assert_served(&block_on(site.get("/api/bin-days")), FetchSource::Network, "tuesday").unwrap();

        site.network.set_offline(true);
        assert_served(&block_on(site.get("/api/bin-days")), FetchSource::Cache, "tuesday").unwrap();
        assert_offline_error(&block_on(site.get("/api/never-fetched"))).unwrap();
    }

    #[test]
    fn test_cross_origin_not_intercepted() {
        let site = installed();
        let request = Request::new("https://maps.example.org/tiles/1.png");
        assert_eq!(block_on(site.registration.handle_fetch(&request)), FetchResult::Passthrough);
        assert!(site.network.requests().is_empty());
    }
}
