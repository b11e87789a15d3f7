#![forbid(unsafe_code)]

//! Tour state machine.
//!
//! [`TutorialStore`] is the only writer of the tour state. Every transition
//! is synchronous; cross-page moves are queued as a pending navigation that
//! the host drains with [`TutorialStore::poll_navigation`] and confirms with
//! [`TutorialStore::set_current_page`].
//!
//! # Invariants
//!
//! 1. `has_seen_tutorial` flips to `true` on completion or skip and never
//!    reverts.
//! 2. While active, `step_index < step_count`.
//! 3. `current_page` mirrors the confirmed route. A step is displayed only
//!    when its page equals `current_page`.
//! 4. At most one navigation is pending; every transition replaces or
//!    cancels it.

use std::time::Duration;

use crate::catalog::tutorial_steps;
use crate::page::Page;
use crate::step::TutorialStep;
use crate::storage::{KeyValueStore, read_seen, write_seen};
use crate::timer::Delay;

/// Delay between leaving the page-transition step and switching pages.
pub const TRANSITION_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Notable transitions, for hosts that react to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    Started,
    StepChanged { from: usize, to: usize },
    Completed,
    Skipped,
    Closed,
}

/// A snapshot of the tour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialState {
    pub is_active: bool,
    pub current_step: usize,
    pub current_page: Page,
    pub has_seen_tutorial: bool,
}

pub struct TutorialStore {
    state: TutorialState,
    steps: Vec<TutorialStep>,
    storage: Box<dyn KeyValueStore>,
    pending_navigation: Option<Page>,
    navigation_delay: Delay,
}

impl TutorialStore {
    /// A store over the ZIP tour catalog.
    ///
    /// The "seen" flag is read once here. An unreadable flag counts as not
    /// seen.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_steps(storage, tutorial_steps().to_vec())
    }

    pub fn with_steps(storage: Box<dyn KeyValueStore>, steps: Vec<TutorialStep>) -> Self {
        let has_seen_tutorial = match read_seen(storage.as_ref()) {
            Ok(seen) => seen,
            Err(error) => {
                tracing::warn!(backend = storage.name(), %error, "failed to read tour flag");
                false
            }
        };
        tracing::debug!(
            backend = storage.name(),
            steps = steps.len(),
            has_seen_tutorial,
            "tour store ready"
        );
        Self {
            state: TutorialState {
                is_active: false,
                current_step: 0,
                current_page: Page::Dashboard,
                has_seen_tutorial,
            },
            steps,
            storage,
            pending_navigation: None,
            navigation_delay: Delay::new(TRANSITION_REDIRECT_DELAY),
        }
    }

    pub fn state(&self) -> TutorialState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn step_index(&self) -> usize {
        self.state.current_step
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_page(&self) -> Page {
        self.state.current_page
    }

    pub fn has_seen_tutorial(&self) -> bool {
        self.state.has_seen_tutorial
    }

    pub fn steps(&self) -> &[TutorialStep] {
        &self.steps
    }

    /// The active step, or `None` when the tour is inactive.
    pub fn current_step(&self) -> Option<&TutorialStep> {
        if !self.state.is_active {
            return None;
        }
        self.steps.get(self.state.current_step)
    }

    /// The active step if it belongs to the page the user is on.
    ///
    /// During a cross-page move this is `None` until the host confirms
    /// arrival.
    pub fn displayed_step(&self) -> Option<&TutorialStep> {
        self.current_step()
            .filter(|step| step.page == self.state.current_page)
    }

    /// Start (or restart) the tour from the first step.
    ///
    /// No-op on an empty step list.
    pub fn start(&mut self) -> Option<TourEvent> {
        if self.steps.is_empty() {
            tracing::debug!("tour has no steps, not starting");
            return None;
        }
        self.cancel_navigation();
        self.state.is_active = true;
        self.state.current_step = 0;
        self.state.current_page = self.steps.first().map_or(Page::Dashboard, |s| s.page);
        tracing::info!(steps = self.steps.len(), "tour started");
        Some(TourEvent::Started)
    }

    /// Move to the next step, running the current step's action first.
    ///
    /// Advancing from the last step completes the tour. No-op when inactive.
    pub fn advance(&mut self) -> Option<TourEvent> {
        let current = *self.current_step()?;
        current.action.run();

        let from = self.state.current_step;
        let to = from + 1;
        let Some(next) = self.steps.get(to).copied() else {
            self.cancel_navigation();
            self.mark_seen();
            self.state.is_active = false;
            tracing::info!(step = current.id, "tour completed");
            return Some(TourEvent::Completed);
        };

        self.state.current_step = to;
        self.cancel_navigation();
        if next.page != self.state.current_page {
            self.queue_navigation(next.page, current.page_transition);
        }
        tracing::debug!(from = current.id, to = next.id, page = %next.page, "tour advanced");
        Some(TourEvent::StepChanged { from, to })
    }

    /// Move back one step. No-op when inactive or on the first step.
    pub fn retreat(&mut self) -> Option<TourEvent> {
        if !self.state.is_active || self.state.current_step == 0 {
            return None;
        }
        let from = self.state.current_step;
        let to = from - 1;
        let previous = self.steps[to];

        self.state.current_step = to;
        self.cancel_navigation();
        if previous.page != self.state.current_page {
            self.queue_navigation(previous.page, false);
        }
        tracing::debug!(from = self.steps[from].id, to = previous.id, "tour retreated");
        Some(TourEvent::StepChanged { from, to })
    }

    /// End the tour for good.
    pub fn skip(&mut self) -> Option<TourEvent> {
        let step = self.current_step().map(|s| s.id);
        self.cancel_navigation();
        self.mark_seen();
        self.state.is_active = false;
        tracing::info!(step, "tour skipped");
        Some(TourEvent::Skipped)
    }

    /// Dismiss the tour for now. The "seen" flag is left alone, so
    /// auto-start may fire again on a later visit.
    pub fn close(&mut self) -> Option<TourEvent> {
        if !self.state.is_active {
            return None;
        }
        self.cancel_navigation();
        self.state.is_active = false;
        tracing::debug!(step = self.state.current_step, "tour closed");
        Some(TourEvent::Closed)
    }

    /// Record the page the user is on. Returns `true` if it changed.
    ///
    /// Any queued navigation is dropped: either the user already arrived
    /// or went somewhere else.
    pub fn set_current_page(&mut self, page: Page) -> bool {
        if self.state.current_page == page {
            return false;
        }
        tracing::debug!(from = %self.state.current_page, to = %page, "page changed");
        self.state.current_page = page;
        self.cancel_navigation();
        true
    }

    /// The page a navigation is queued for, if any.
    pub fn pending_navigation(&self) -> Option<Page> {
        self.pending_navigation
    }

    /// Advance the navigation delay by `elapsed` and take the navigation
    /// once it is due.
    pub fn poll_navigation(&mut self, elapsed: Duration) -> Option<Page> {
        self.pending_navigation?;
        if self.navigation_delay.is_pending() && !self.navigation_delay.tick(elapsed) {
            return None;
        }
        self.pending_navigation.take()
    }

    fn queue_navigation(&mut self, page: Page, delayed: bool) {
        self.pending_navigation = Some(page);
        if delayed {
            self.navigation_delay.arm();
        }
        tracing::debug!(to = %page, delayed, "navigation queued");
    }

    /// Drop a queued navigation. Hosts call this when the user leaves the
    /// page on their own. Returns `true` if one was pending.
    pub fn cancel_navigation(&mut self) -> bool {
        self.navigation_delay.cancel();
        let Some(page) = self.pending_navigation.take() else {
            return false;
        };
        tracing::debug!(to = %page, "queued navigation cancelled");
        true
    }

    fn mark_seen(&mut self) {
        self.state.has_seen_tutorial = true;
        if let Err(error) = write_seen(self.storage.as_ref()) {
            tracing::warn!(backend = self.storage.name(), %error, "failed to persist tour flag");
        }
    }
}

impl std::fmt::Debug for TutorialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorialStore")
            .field("state", &self.state)
            .field("steps", &self.steps.len())
            .field("storage", &self.storage.name())
            .field("pending_navigation", &self.pending_navigation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{Placement, Target};
    use crate::storage::{MemoryStorage, SEEN_KEY, StorageError, StorageResult};

    fn store() -> (TutorialStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (TutorialStore::new(Box::new(storage.clone())), storage)
    }

    struct FailingStorage;

    impl KeyValueStore for FailingStorage {
        fn name(&self) -> &str {
            "FailingStorage"
        }
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Corruption("unreadable".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn starts_inactive_with_no_step() {
        let (store, _) = store();
        assert!(!store.is_active());
        assert!(store.current_step().is_none());
        assert!(!store.has_seen_tutorial());
    }

    #[test]
    fn reads_seen_flag_at_construction() {
        let storage = MemoryStorage::with_entries([(SEEN_KEY, "true")]);
        assert!(TutorialStore::new(Box::new(storage)).has_seen_tutorial());
    }

    #[test]
    fn start_is_reentrant() {
        let (mut store, _) = store();
        store.start();
        store.advance();
        store.advance();
        assert_eq!(store.step_index(), 2);
        assert_eq!(store.start(), Some(TourEvent::Started));
        assert_eq!(store.step_index(), 0);
        assert_eq!(store.current_page(), Page::Dashboard);
    }

    #[test]
    fn advance_and_retreat_are_noops_when_inactive() {
        let (mut store, _) = store();
        assert_eq!(store.advance(), None);
        assert_eq!(store.retreat(), None);
        assert_eq!(store.step_index(), 0);
    }

    #[test]
    fn retreat_at_first_step_is_noop() {
        let (mut store, _) = store();
        store.start();
        assert_eq!(store.retreat(), None);
        assert_eq!(store.step_index(), 0);
    }

    #[test]
    fn close_keeps_seen_flag_unset() {
        let (mut store, storage) = store();
        store.start();
        assert_eq!(store.close(), Some(TourEvent::Closed));
        assert!(!store.is_active());
        assert!(!store.has_seen_tutorial());
        assert_eq!(storage.get(SEEN_KEY).unwrap(), None);
        assert_eq!(store.close(), None);
    }

    #[test]
    fn skip_persists_seen_flag() {
        let (mut store, storage) = store();
        store.start();
        store.advance();
        assert_eq!(store.skip(), Some(TourEvent::Skipped));
        assert!(!store.is_active());
        assert!(store.has_seen_tutorial());
        assert_eq!(storage.get(SEEN_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn storage_failures_do_not_block_transitions() {
        let mut store = TutorialStore::new(Box::new(FailingStorage));
        assert!(!store.has_seen_tutorial());
        store.start();
        store.skip();
        assert!(store.has_seen_tutorial());
        assert!(!store.is_active());
    }

    #[test]
    fn same_page_advance_queues_nothing() {
        let (mut store, _) = store();
        store.start();
        store.advance();
        assert_eq!(store.pending_navigation(), None);
        assert_eq!(store.displayed_step().map(|s| s.id), Some("navigation"));
    }

    #[test]
    fn set_current_page_is_idempotent() {
        let (mut store, _) = store();
        assert!(!store.set_current_page(Page::Dashboard));
        assert!(store.set_current_page(Page::Profile));
        assert!(!store.set_current_page(Page::Profile));
        assert_eq!(store.current_page(), Page::Profile);
    }

    #[test]
    fn retreat_across_pages_queues_immediate_navigation() {
        let (mut store, _) = store();
        store.start();
        for _ in 0..8 {
            store.advance();
        }
        assert!(store.set_current_page(Page::Profile));
        assert_eq!(store.retreat(), Some(TourEvent::StepChanged { from: 8, to: 7 }));
        assert!(store.displayed_step().is_none());
        assert_eq!(store.poll_navigation(Duration::ZERO), Some(Page::Dashboard));
        store.set_current_page(Page::Dashboard);
        assert_eq!(store.displayed_step().map(|s| s.id), Some("profile-transition"));
    }

    #[test]
    fn leaving_the_page_drops_the_queued_redirect() {
        let (mut store, _) = store();
        store.start();
        for _ in 0..8 {
            store.advance();
        }
        store.poll_navigation(Duration::from_millis(200));
        assert_eq!(store.pending_navigation(), Some(Page::Profile));

        assert!(store.cancel_navigation());
        assert!(!store.cancel_navigation());
        assert_eq!(store.poll_navigation(Duration::from_secs(1)), None);
        assert!(store.is_active());
        assert_eq!(store.step_index(), 8);

        store.set_current_page(Page::Profile);
        assert_eq!(store.displayed_step().map(|s| s.id), Some("profile-overview"));
    }

    #[test]
    fn manual_page_change_drops_the_queued_redirect() {
        let (mut store, _) = store();
        store.start();
        for _ in 0..8 {
            store.advance();
        }
        store.set_current_page(Page::Profile);
        assert_eq!(store.pending_navigation(), None);
        store.retreat();
        assert_eq!(store.pending_navigation(), Some(Page::Dashboard));
        store.set_current_page(Page::Dashboard);
        assert_eq!(store.pending_navigation(), None);
    }

    #[test]
    fn retreat_cancels_pending_redirect() {
        let (mut store, _) = store();
        store.start();
        for _ in 0..8 {
            store.advance();
        }
        assert_eq!(store.pending_navigation(), Some(Page::Profile));
        store.retreat();
        assert_eq!(store.pending_navigation(), None);
        assert_eq!(store.poll_navigation(Duration::from_secs(1)), None);
    }

    #[test]
    fn advance_runs_the_current_step_action() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn count() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let steps = vec![
            TutorialStep::new("a", Target::WholePage, "A", "", Placement::Center, Page::Dashboard)
                .action(count),
            TutorialStep::new("b", Target::WholePage, "B", "", Placement::Center, Page::Dashboard),
        ];
        let mut store = TutorialStore::with_steps(Box::new(MemoryStorage::new()), steps);
        store.start();
        store.advance();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        store.advance();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert!(!store.is_active());
    }

    #[test]
    fn empty_catalog_never_shows_a_step() {
        let mut store = TutorialStore::with_steps(Box::new(MemoryStorage::new()), Vec::new());
        assert_eq!(store.start(), None);
        assert!(!store.is_active());
        assert!(store.current_step().is_none());
        assert_eq!(store.advance(), None);
    }
}
