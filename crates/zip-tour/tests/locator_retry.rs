#![forbid(unsafe_code)]

//! Late-rendered targets are picked up by the single retry.
//!
//!   cargo test -p zip-tour --test locator_retry

use std::time::Duration;

use zip_core::geometry::Rect;
use zip_tour::locator::{AnchorSource, Node, RETRY_DELAY, StaticDocument, TargetLocator};
use zip_tour::overlay::{OverlayController, OverlayState};
use zip_tour::page::Page;
use zip_tour::storage::MemoryStorage;
use zip_tour::store::TutorialStore;
use zip_tour::tutorial_steps;

fn profile_without_claim_button() -> StaticDocument {
    let mut doc = StaticDocument::new(Rect::new(0, 0, 120, 40));
    doc.push(Node::new("nav", Rect::new(0, 0, 120, 3)));
    doc.push(Node::new("section", Rect::new(2, 4, 80, 8)).tutorial("profile-overview"));
    doc.push(Node::new("div", Rect::new(2, 13, 40, 5)).tutorial("earnings-display"));
    doc
}

fn claim_step() -> usize {
    tutorial_steps()
        .iter()
        .position(|s| s.id == "claim-button")
        .unwrap()
}

#[test]
fn claim_button_rendered_late_is_found_on_retry() {
    let step = &tutorial_steps()[claim_step()];
    let mut doc = profile_without_claim_button();
    let mut locator = TargetLocator::new();

    assert!(locator.locate(step, &doc).is_none());
    assert!(locator.is_retry_pending());

    doc.push(Node::new("button", Rect::new(4, 16, 12, 1)).tutorial("claim-button"));
    assert!(!locator.tick(RETRY_DELAY - Duration::from_millis(1), &doc));
    assert!(locator.tick(Duration::from_millis(1), &doc));

    let anchor = locator.anchor().unwrap();
    assert_eq!(anchor.source, AnchorSource::Primary);
    assert_eq!(anchor.bounds, Rect::new(4, 16, 12, 1));
    assert_eq!(
        anchor.selector().map(|s| s.as_str()),
        Some(r#"[data-tutorial="claim-button"]"#)
    );
}

#[test]
fn retry_fires_once() {
    let step = &tutorial_steps()[claim_step()];
    let mut doc = profile_without_claim_button();
    let mut locator = TargetLocator::new();
    locator.locate(step, &doc);

    assert!(!locator.tick(RETRY_DELAY, &doc));
    assert!(!locator.is_retry_pending());

    doc.push(Node::new("button", Rect::new(4, 16, 12, 1)).tutorial("claim-button"));
    assert!(!locator.tick(Duration::from_secs(5), &doc));
    assert!(locator.anchor().is_none());
}

#[test]
fn overlay_moves_the_tooltip_once_the_target_appears() {
    let mut store = TutorialStore::new(Box::new(MemoryStorage::new()));
    store.start();
    while store.step_index() < claim_step() {
        store.advance();
        if let Some(page) = store.poll_navigation(Duration::from_secs(1)) {
            store.set_current_page(page);
        }
    }
    assert_eq!(store.current_page(), Page::Profile);

    let mut doc = profile_without_claim_button();
    let mut overlay = OverlayController::default();
    overlay.sync(&store, &doc);
    assert_eq!(overlay.state(&store), OverlayState::Showing { step: claim_step() });
    let centered = overlay.layout().copied().unwrap();
    assert!(centered.spotlight.is_none());

    doc.push(Node::new("button", Rect::new(4, 16, 12, 1)).tutorial("claim-button"));
    assert!(overlay.tick(RETRY_DELAY, &doc));
    overlay.sync(&store, &doc);
    let anchored = overlay.layout().copied().unwrap();
    assert_eq!(anchored.spotlight, Some(Rect::new(3, 15, 14, 3)));
    assert_eq!(anchored.area.y, 18);
}
