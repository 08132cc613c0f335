//! E2E Test: PWA Notifications
//!
//! Tests push messages and notification clicks:
//! 1. A push shows a notification with the site's title
//! 2. "View" focuses an open home page or opens one
//! 3. "Close" only dismisses
//! 4. Host failures never escape the controller

#[cfg(test)]
mod tests {
    use council_e2e_tests::fixtures::NotifierCall;
    use council_e2e_tests::SiteHarness;
    use council_offline::service_worker::events::DEFAULT_PUSH_BODY;
    use council_offline::service_worker::{ClickOutcome, NotificationClickEvent, PushEvent, SyncOutcome};
    use futures::executor::block_on;

    fn site() -> SiteHarness {
        let mut site = SiteHarness::new("v1");
        block_on(site.deploy("council-v1")).unwrap();
        site
    }

    #[test]
    fn test_push_shows_notification() {
        let site = site();
        block_on(site.registration.handle_push(&PushEvent::new(Some(b"Bin day moved to Tuesday".to_vec()), 1)));
        block_on(site.registration.handle_push(&PushEvent::new(None, 2)));

        assert_eq!(
            site.notifier.calls(),
            vec![
                NotifierCall::Show {
                    title: "District Council".into(),
                    body: "Bin day moved to Tuesday".into(),
                },
                NotifierCall::Show {
                    title: "District Council".into(),
                    body: DEFAULT_PUSH_BODY.into(),
                },
            ]
        );
    }

    #[test]
    fn test_view_opens_home_page() {
        let site = site();
        let click = NotificationClickEvent::new().with_action("view").with_tag("bins");
        let outcome = block_on(site.registration.handle_notification_click(&click));

        assert_eq!(outcome, ClickOutcome::Opened);
        assert_eq!(
            site.notifier.calls(),
            vec![NotifierCall::Close(Some("bins".into())), NotifierCall::Open("/".into())]
        );
    }

    #[test]
    fn test_view_focuses_open_home_page() {
        let mut site = site();
        site.registration.client_opened("https://council.example/housing");
        let home = site.registration.client_opened("https://council.example/?utm=push");

        let view = NotificationClickEvent::new().with_action("view");
        let outcome = block_on(site.registration.handle_notification_click(&view));
        assert_eq!(outcome, ClickOutcome::Focused(home));
        assert!(site.notifier.calls().contains(&NotifierCall::Focus(home)));
    }

    #[test]
    fn test_close_only_dismisses() {
        let site = site();
        let click = NotificationClickEvent::new().with_action("close");
        let outcome = block_on(site.registration.handle_notification_click(&click));

        assert_eq!(outcome, ClickOutcome::Dismissed);
        assert_eq!(site.notifier.calls(), vec![NotifierCall::Close(None)]);
    }

    #[test]
    fn test_body_click_only_closes() {
        let mut site = site();
        site.registration.client_opened("https://council.example/");
        let click = NotificationClickEvent::new().with_tag("bins");
        let outcome = block_on(site.registration.handle_notification_click(&click));

        assert_eq!(outcome, ClickOutcome::Dismissed);
        assert_eq!(site.notifier.calls(), vec![NotifierCall::Close(Some("bins".into()))]);
    }

    #[test]
    fn test_denied_permission_is_contained() {
        let site = site();
        site.notifier.set_denied(true);

        block_on(site.registration.handle_push(&PushEvent::new(Some(b"x".to_vec()), 0)));
        let view = NotificationClickEvent::new().with_action("view");
        let outcome = block_on(site.registration.handle_notification_click(&view));

        assert_eq!(outcome, ClickOutcome::Dismissed);
        assert_eq!(site.notifier.calls(), vec![NotifierCall::Close(None)]);
    }

    #[test]
    fn test_periodic_content_refresh() {
        let mut site = site();
        let day = 24 * 60 * 60 * 1000;
        assert_eq!(block_on(site.registration.handle_periodic_sync("update-content", day)), SyncOutcome::ContentRefreshed);
        assert_eq!(block_on(site.registration.handle_periodic_sync("update-content", day + 1)), SyncOutcome::TooSoon);
        assert_eq!(
            block_on(site.registration.handle_periodic_sync("update-content", 2 * day)),
            SyncOutcome::ContentRefreshed
        );
    }
}
