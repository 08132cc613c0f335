//! E2E Test: PWA Storage
//!
//! Tests that personal settings survive page reloads and degrade quietly:
//! 1. Task usage persists and reorders the default list
//! 2. The theme preference persists
//! 3. Corrupted or unavailable storage never breaks the page

#[cfg(test)]
mod tests {
    use council_e2e_tests::CatalogFixtures;
    use council_search::storage::{KeyValueStore, USAGE_KEY};
    use council_search::{CommandPalette, MemoryStore, Theme, ThemePreference, UsageTracker};

    fn ids(palette: &CommandPalette) -> Vec<&str> {
        palette.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_usage_survives_reload() {
        let catalog = CatalogFixtures::district_council();
        let mut usage = UsageTracker::new(MemoryStore::new());
        usage.record_usage("housing");
        usage.record_usage("housing");
        usage.record_usage("council-tax");

        // Reload: a new tracker over the same storage.
        let usage = UsageTracker::new(usage.into_store());
        let mut palette = CommandPalette::new();
        palette.open(&catalog, &usage);
        assert_eq!(
            ids(&palette),
            vec!["housing", "council-tax", "bins", "report-bin", "fly-tipping", "planning"]
        );
    }

    #[test]
    fn test_corrupted_usage_starts_fresh() {
        let catalog = CatalogFixtures::district_council();
        let mut store = MemoryStore::new();
        store.set(USAGE_KEY, "{not json").unwrap();

        let usage = UsageTracker::new(store);
        assert!(usage.counts().is_empty());
        let top: Vec<&str> = usage.top_tasks(&catalog, 3).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(top, vec!["bins", "report-bin", "council-tax"]);
    }

    #[test]
    fn test_unavailable_storage_keeps_session_counts() {
        let mut usage = UsageTracker::new(MemoryStore::unavailable());
        usage.record_usage("bins");
        assert_eq!(usage.usage_count("bins"), 1);
    }

    #[test]
    fn test_full_storage_keeps_session_counts() {
        let mut usage = UsageTracker::new(MemoryStore::with_quota(8));
        usage.record_usage("planning");
        usage.record_usage("planning");
        assert_eq!(usage.usage_count("planning"), 2);
        assert!(usage.store().is_empty());
    }

    #[test]
    fn test_theme_survives_reload() {
        let mut store = MemoryStore::new();
        let mut toggle = ThemePreference::new(&mut store);
        assert_eq!(toggle.current(), Theme::Auto);
        assert_eq!(toggle.cycle(), Theme::Light);
        assert_eq!(toggle.cycle(), Theme::Dark);

        let mut toggle = ThemePreference::new(&mut store);
        assert_eq!(toggle.current(), Theme::Dark);
        assert_eq!(toggle.cycle(), Theme::Auto);
    }

    #[test]
    fn test_theme_toggle_with_blocked_storage() {
        let mut toggle = ThemePreference::new(MemoryStore::unavailable());
        assert_eq!(toggle.cycle(), Theme::Light);
        assert_eq!(toggle.cycle(), Theme::Dark);
        assert_eq!(toggle.current().theme_color(false), "#0F172A");
    }
}
