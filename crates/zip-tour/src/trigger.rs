#![forbid(unsafe_code)]

//! Starting the tour without an explicit button press.
//!
//! [`TutorialTrigger`] auto-starts the tour for first-time visitors of the
//! trigger page. [`LandingLaunch`] is the landing page's "take the tour"
//! path: switch to the dashboard, then start shortly after.

use std::time::Duration;

use crate::navigation::{NavigationOutcome, Navigator, navigate_or_redirect};
use crate::page::Page;
use crate::store::{TourEvent, TutorialStore};
use crate::timer::Delay;

/// Settling time before an automatic start.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(1);

/// Time between the landing page's navigation and the tour start.
pub const LANDING_START_DELAY: Duration = Duration::from_millis(500);

/// Whether the user may still be offered the tour.
pub fn can_start_tutorial(store: &TutorialStore) -> bool {
    !store.has_seen_tutorial()
}

#[derive(Debug, Clone)]
pub struct TutorialTrigger {
    auto_start: bool,
    trigger_page: Page,
    delay: Delay,
}

impl Default for TutorialTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorialTrigger {
    pub fn new() -> Self {
        Self {
            auto_start: true,
            trigger_page: Page::Dashboard,
            delay: Delay::new(AUTO_START_DELAY),
        }
    }

    #[must_use]
    pub fn auto_start(mut self, enabled: bool) -> Self {
        self.auto_start = enabled;
        self
    }

    #[must_use]
    pub fn trigger_page(mut self, page: Page) -> Self {
        self.trigger_page = page;
        self
    }

    fn should_start(&self, store: &TutorialStore, route: &str) -> bool {
        self.auto_start
            && !store.has_seen_tutorial()
            && !store.is_active()
            && Page::from_path(route) == Some(self.trigger_page)
    }

    /// Arm the auto-start if this visit qualifies. Returns whether it did.
    pub fn on_page_load(&mut self, store: &TutorialStore, route: &str) -> bool {
        if !self.should_start(store, route) {
            self.delay.cancel();
            return false;
        }
        self.delay.arm();
        tracing::debug!(route, delay_ms = AUTO_START_DELAY.as_millis() as u64, "tour auto-start armed");
        true
    }

    /// Advance the delay and start the tour when it fires.
    ///
    /// The pending start is dropped as soon as the visit stops qualifying,
    /// e.g. the user navigated away or started the tour by hand.
    pub fn tick(
        &mut self,
        elapsed: Duration,
        store: &mut TutorialStore,
        route: &str,
    ) -> Option<TourEvent> {
        if !self.delay.is_pending() {
            return None;
        }
        if !self.should_start(store, route) {
            tracing::debug!(route, "tour auto-start cancelled");
            self.delay.cancel();
            return None;
        }
        if !self.delay.tick(elapsed) {
            return None;
        }
        store.start()
    }

    pub fn is_pending(&self) -> bool {
        self.delay.is_pending()
    }

    /// Cancel any pending start. Call when the page goes away.
    pub fn teardown(&mut self) {
        self.delay.cancel();
    }
}

/// Landing page call-to-action.
#[derive(Debug, Clone)]
pub struct LandingLaunch {
    delay: Delay,
}

impl Default for LandingLaunch {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingLaunch {
    pub fn new() -> Self {
        Self {
            delay: Delay::new(LANDING_START_DELAY),
        }
    }

    /// Switch to the dashboard and schedule the start.
    ///
    /// A rejected client-side push falls back to a hard redirect; the start
    /// is scheduled either way.
    pub fn launch(&mut self, navigator: &mut dyn Navigator) -> NavigationOutcome {
        let outcome = navigate_or_redirect(navigator, Page::Dashboard);
        self.delay.arm();
        outcome
    }

    /// Advance the delay and start the tour when it fires.
    ///
    /// The pending start is dropped once `route` is no longer the dashboard.
    pub fn tick(
        &mut self,
        elapsed: Duration,
        store: &mut TutorialStore,
        route: &str,
    ) -> Option<TourEvent> {
        if !self.delay.is_pending() {
            return None;
        }
        if Page::from_path(route) != Some(Page::Dashboard) {
            tracing::debug!(route, "landing tour start cancelled");
            self.delay.cancel();
            return None;
        }
        if !self.delay.tick(elapsed) {
            return None;
        }
        store.start()
    }

    pub fn is_pending(&self) -> bool {
        self.delay.is_pending()
    }

    pub fn cancel(&mut self) {
        self.delay.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationError;
    use crate::storage::{MemoryStorage, SEEN_KEY};

    fn fresh() -> TutorialStore {
        TutorialStore::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn auto_starts_after_one_second_on_dashboard() {
        let mut store = fresh();
        let mut trigger = TutorialTrigger::new();
        assert!(trigger.on_page_load(&store, "/dashboard"));
        assert_eq!(trigger.tick(Duration::from_millis(999), &mut store, "/dashboard"), None);
        assert_eq!(
            trigger.tick(Duration::from_millis(1), &mut store, "/dashboard"),
            Some(TourEvent::Started)
        );
        assert!(store.is_active());
        assert!(!trigger.is_pending());
    }

    #[test]
    fn does_not_arm_for_returning_users() {
        let store = TutorialStore::new(Box::new(MemoryStorage::with_entries([(SEEN_KEY, "true")])));
        assert!(!TutorialTrigger::new().on_page_load(&store, "/dashboard"));
    }

    #[test]
    fn does_not_arm_off_trigger_page_or_when_disabled() {
        let store = fresh();
        assert!(!TutorialTrigger::new().on_page_load(&store, "/profile"));
        assert!(!TutorialTrigger::new().on_page_load(&store, "/"));
        assert!(!TutorialTrigger::new().auto_start(false).on_page_load(&store, "/dashboard"));
        assert!(
            TutorialTrigger::new()
                .trigger_page(Page::Profile)
                .on_page_load(&store, "/profile")
        );
    }

    #[test]
    fn does_not_arm_while_active() {
        let mut store = fresh();
        store.start();
        assert!(!TutorialTrigger::new().on_page_load(&store, "/dashboard"));
    }

    #[test]
    fn navigating_away_cancels() {
        let mut store = fresh();
        let mut trigger = TutorialTrigger::new();
        trigger.on_page_load(&store, "/dashboard");
        assert_eq!(trigger.tick(Duration::from_millis(500), &mut store, "/"), None);
        assert!(!trigger.is_pending());
        assert_eq!(trigger.tick(Duration::from_secs(5), &mut store, "/dashboard"), None);
        assert!(!store.is_active());
    }

    #[test]
    fn teardown_cancels() {
        let mut store = fresh();
        let mut trigger = TutorialTrigger::new();
        trigger.on_page_load(&store, "/dashboard");
        trigger.teardown();
        assert_eq!(trigger.tick(Duration::from_secs(2), &mut store, "/dashboard"), None);
        assert!(!store.is_active());
    }

    #[derive(Default)]
    struct Nav {
        fail: bool,
        pushed: Vec<Page>,
        redirected: Vec<Page>,
    }

    impl Navigator for Nav {
        fn push(&mut self, page: Page) -> Result<(), NavigationError> {
            if self.fail {
                return Err(NavigationError::Rejected {
                    to: page,
                    reason: "router busy".into(),
                });
            }
            self.pushed.push(page);
            Ok(())
        }

        fn redirect(&mut self, page: Page) {
            self.redirected.push(page);
        }
    }

    #[test]
    fn landing_launch_pushes_then_starts() {
        let mut store = fresh();
        let mut nav = Nav::default();
        let mut launch = LandingLaunch::new();
        assert_eq!(launch.launch(&mut nav), NavigationOutcome::Pushed);
        assert_eq!(nav.pushed, vec![Page::Dashboard]);
        assert_eq!(launch.tick(Duration::from_millis(499), &mut store, "/dashboard"), None);
        assert_eq!(
            launch.tick(Duration::from_millis(1), &mut store, "/dashboard"),
            Some(TourEvent::Started)
        );
        assert_eq!(store.current_page(), Page::Dashboard);
    }

    #[test]
    fn landing_launch_redirects_on_failure_and_still_starts() {
        let mut store = fresh();
        let mut nav = Nav {
            fail: true,
            ..Nav::default()
        };
        let mut launch = LandingLaunch::new();
        assert_eq!(launch.launch(&mut nav), NavigationOutcome::Redirected);
        assert!(nav.pushed.is_empty());
        assert_eq!(nav.redirected, vec![Page::Dashboard]);
        assert!(launch.is_pending());
        assert_eq!(
            launch.tick(LANDING_START_DELAY, &mut store, "/dashboard"),
            Some(TourEvent::Started)
        );
    }

    #[test]
    fn landing_launch_cancelled_when_user_leaves_dashboard() {
        let mut store = fresh();
        let mut launch = LandingLaunch::new();
        launch.launch(&mut Nav::default());
        assert_eq!(launch.tick(Duration::from_millis(100), &mut store, "/dashboard"), None);
        assert_eq!(launch.tick(Duration::from_millis(100), &mut store, "/"), None);
        assert!(!launch.is_pending());
        assert_eq!(launch.tick(Duration::from_secs(1), &mut store, "/dashboard"), None);
        assert!(!store.is_active());
    }

    #[test]
    fn can_start_until_seen() {
        let mut store = fresh();
        assert!(can_start_tutorial(&store));
        store.skip();
        assert!(!can_start_tutorial(&store));
    }
}
