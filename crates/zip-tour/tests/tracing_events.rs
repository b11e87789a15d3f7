#![forbid(unsafe_code)]

//! Log output of the tour under a capturing subscriber.
//!
//!   cargo test -p zip-tour --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_tour::locator::{Node, StaticDocument};
use zip_tour::navigation::{NavigationError, Navigator, navigate_or_redirect};
use zip_tour::overlay::OverlayController;
use zip_tour::page::Page;
use zip_tour::storage::{KeyValueStore, StorageError, StorageResult};
use zip_tour::store::TutorialStore;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

#[derive(Default, Clone)]
struct Captured {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

impl Captured {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == tracing::Level::WARN)
            .collect()
    }

    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct CaptureLayer(Captured);

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.0
            .spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.0.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Captured {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(captured.clone()));
    tracing::subscriber::with_default(subscriber, f);
    captured
}

/// Every operation fails.
struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn name(&self) -> &str {
        "broken"
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
fn storage_failures_are_warned_not_fatal() {
    let captured = with_captured(|| {
        let mut store = TutorialStore::new(Box::new(BrokenStorage));
        assert!(!store.has_seen_tutorial());
        store.start();
        store.skip();
        assert!(store.has_seen_tutorial());
    });

    let warnings = captured.warnings();
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings.iter().all(|w| w.fields.get("backend").map(String::as_str) == Some("broken")));
    assert!(warnings[1].fields["error"].contains("read-only"));
}

#[test]
fn lifecycle_is_logged_at_info() {
    let captured = with_captured(|| {
        let mut store = TutorialStore::new(Box::new(zip_tour::storage::MemoryStorage::new()));
        store.start();
        store.skip();
    });
    let info: Vec<_> = captured
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::INFO)
        .map(|e| e.message)
        .collect();
    assert_eq!(info, vec!["tour started", "tour skipped"]);
}

#[test]
fn invalid_selector_is_warned() {
    let captured = with_captured(|| {
        let doc = StaticDocument::new(Rect::new(0, 0, 80, 24));
        let anchor = zip_tour::locator::resolve(
            &doc,
            zip_tour::step::Target::Selector("div > span"),
            &[],
        );
        assert!(anchor.is_none());
    });
    let warnings = captured.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "invalid tour selector");
    assert_eq!(warnings[0].fields["selector"], "div > span");
}

struct Offline;

impl Navigator for Offline {
    fn push(&mut self, _page: Page) -> Result<(), NavigationError> {
        Err(NavigationError::Unavailable)
    }

    fn redirect(&mut self, _page: Page) {}
}

#[test]
fn failed_navigation_is_warned() {
    let captured = with_captured(|| {
        navigate_or_redirect(&mut Offline, Page::Dashboard);
    });
    let warnings = captured.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields["to"], "/dashboard");
}

#[test]
fn overlay_render_opens_a_span() {
    let captured = with_captured(|| {
        let mut store = TutorialStore::new(Box::new(zip_tour::storage::MemoryStorage::new()));
        store.start();
        let mut doc = StaticDocument::new(Rect::new(0, 0, 80, 24));
        doc.push(Node::new("nav", Rect::new(0, 0, 80, 2)));
        let mut overlay = OverlayController::default();
        overlay.sync(&store, &doc);
        let mut buf = Buffer::new(80, 24);
        overlay.render(&store, &mut buf);
    });
    assert!(captured.spans().iter().any(|s| s == "overlay_render"));
}
