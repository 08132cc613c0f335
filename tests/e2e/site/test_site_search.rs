//! E2E Test: Site Search
//!
//! Tests the command palette against the district council catalog:
//! 1. Free-text queries rank across titles, keywords and descriptions
//! 2. A blank query shows the default tasks
//! 3. Picking a result navigates and personalises the default list

#[cfg(test)]
mod tests {
    use council_e2e_tests::assertions::*;
    use council_e2e_tests::SiteHarness;
    use council_search::{search, EntryKind, MatchField, DEFAULT_LIMIT};

    #[test]
    fn test_category_outranks_task_on_shorter_title() {
        let site = SiteHarness::new("v1");
        let results = search("tax", &site.catalog);
        assert_ranked_first(&results, &["service-council-tax", "council-tax"]).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].entry.kind, EntryKind::Category);
    }

    #[test]
    fn test_keyword_match_can_lead() {
        let site = SiteHarness::new("v1");
        let results = search("bin", &site.catalog);

        // "building development" beats "Find my bin day".
        assert_ranked_first(&results, &["service-bins", "planning", "business-rates", "bins"]).unwrap();
        assert_eq!(results[1].field, MatchField::Keywords);
        assert_eq!(results.len(), DEFAULT_LIMIT);
        assert_unique_entries(&results).unwrap();
    }

    #[test]
    fn test_blank_and_unmatched_queries() {
        let site = SiteHarness::new("v1");
        assert!(search("   ", &site.catalog).is_empty());
        assert!(search("zzq", &site.catalog).is_empty());
    }

    #[test]
    fn test_palette_pick_personalises_defaults() {
        let mut site = SiteHarness::new("v1");
        site.palette.open(&site.catalog, &site.usage);
        assert_eq!(site.palette.items().len(), 6);
        assert_eq!(site.palette.selected().unwrap().id, "bins");

        site.palette.select_next();
        site.palette.select_next();
        assert_eq!(site.palette.activate(&mut site.usage).as_deref(), Some("/pay/council-tax"));
        assert!(!site.palette.is_open());

        site.palette.open(&site.catalog, &site.usage);
        assert_eq!(site.palette.items()[0].id, "council-tax");
        assert_eq!(site.palette.items()[1].id, "bins");
    }

    #[test]
    fn test_voice_query_opens_palette_with_results() {
        let mut site = SiteHarness::new("v1");
        site.palette.open_with_query("planning", &site.catalog, &site.usage);

        assert!(site.palette.is_open());
        let first = site.palette.selected().unwrap();
        assert_eq!(first.id, "service-planning");
        assert!(first.score.is_some());
        assert_eq!(first.positions.len(), "planning".len());

        site.palette.select_previous();
        assert_eq!(site.palette.selected_index(), site.palette.items().len() - 1);
    }
}
