#![forbid(unsafe_code)]

//! Demo application: routing, page switching, and the tour wiring.
//!
//! [`App`] is headless. [`run`] puts it in a terminal: it owns the
//! [`TerminalSession`], feeds ticks and input to the app, and presents each
//! frame.

use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use zip_core::event::{Event, KeyCode};
use zip_core::geometry::{Rect, Size};
use zip_core::terminal_session::{SessionOptions, TerminalSession};
use zip_render::buffer::Buffer;
use zip_render::presenter::Presenter;
use zip_tour::error::TourError;
use zip_tour::locator::StaticDocument;
use zip_tour::navigation::{NavigationError, Navigator, navigate_or_redirect};
use zip_tour::overlay::{EventResult, OverlayController};
use zip_tour::page::Page;
use zip_tour::storage::{FileStorage, KeyValueStore, MemoryStorage, SEEN_KEY};
use zip_tour::store::TutorialStore;
use zip_tour::{LandingLaunch, TutorialProvider, TutorialTrigger};

use crate::cli::Opts;
use crate::pages::{DashboardPage, LandingPage, PageAction, ProfilePage, RenderContext, View};
use crate::route::Route;

/// Input poll timeout; also the frame interval when idle.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Errors that end the demo.
#[derive(Debug)]
pub enum DemoError {
    Io(io::Error),
    Tour(TourError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Io(e) => write!(f, "terminal error: {e}"),
            DemoError::Tour(e) => write!(f, "tour setup failed: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Io(e) => Some(e),
            DemoError::Tour(e) => Some(e),
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        DemoError::Io(e)
    }
}

impl From<TourError> for DemoError {
    fn from(e: TourError) -> Self {
        DemoError::Tour(e)
    }
}

/// Current route plus back history.
#[derive(Debug, Clone, Default)]
pub struct Router {
    route: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            route: start,
            history: Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn go(&mut self, route: Route) {
        if route != self.route {
            self.history.push(self.route);
            self.route = route;
        }
    }

    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop()?;
        self.route = previous;
        Some(previous)
    }
}

impl Navigator for Router {
    fn push(&mut self, page: Page) -> Result<(), NavigationError> {
        self.go(Route::Tour(page));
        Ok(())
    }

    fn redirect(&mut self, page: Page) {
        tracing::info!(to = page.path(), "hard redirect");
        self.history.clear();
        self.route = Route::Tour(page);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub start: Route,
    pub auto_start: bool,
    pub exit_after: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start: Route::Landing,
            auto_start: true,
            exit_after: None,
        }
    }
}

impl From<&Opts> for AppConfig {
    fn from(opts: &Opts) -> Self {
        Self {
            start: opts.start,
            auto_start: opts.auto_start,
            exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
        }
    }
}

pub struct App {
    provider: TutorialProvider,
    overlay: OverlayController,
    trigger: TutorialTrigger,
    launch: LandingLaunch,
    router: Router,
    landing: LandingPage,
    dashboard: DashboardPage,
    profile: ProfilePage,
    document: StaticDocument,
    uptime: Duration,
    exit_after: Option<Duration>,
    quit: bool,
}

impl App {
    pub fn new(store: TutorialStore, config: AppConfig) -> Result<Self, TourError> {
        let mut app = Self {
            provider: TutorialProvider::with_store(store)?,
            overlay: OverlayController::default(),
            trigger: TutorialTrigger::new().auto_start(config.auto_start),
            launch: LandingLaunch::new(),
            router: Router::new(config.start),
            landing: LandingPage::new(),
            dashboard: DashboardPage::new(),
            profile: ProfilePage::new(),
            document: StaticDocument::default(),
            uptime: Duration::ZERO,
            exit_after: config.exit_after,
            quit: false,
        };
        app.on_route_change();
        Ok(app)
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    pub fn tutorial(&mut self) -> &mut TutorialStore {
        self.provider.tutorial()
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn view(&mut self) -> &mut dyn View {
        match self.router.route() {
            Route::Landing => &mut self.landing,
            Route::Tour(Page::Dashboard) => &mut self.dashboard,
            Route::Tour(Page::Profile) => &mut self.profile,
        }
    }

    /// The page observer: tell the tour where the user is and re-arm the
    /// auto-start for the new page.
    ///
    /// Delays owned by the page being left are cancelled. A navigation the
    /// tour asked for has already been taken by `poll_navigation`, so only
    /// a queued one the user walked away from is dropped here.
    fn on_route_change(&mut self) {
        let route = self.router.route();
        tracing::debug!(%route, "route changed");
        let store = self.provider.tutorial();
        store.cancel_navigation();
        if let Some(page) = route.page() {
            store.set_current_page(page);
        }
        if route != Route::Tour(Page::Dashboard) {
            self.launch.cancel();
        }
        self.trigger.teardown();
        self.trigger.on_page_load(self.provider.tutorial(), route.path());
        self.overlay.invalidate();
        self.view().on_load();
    }

    fn settle(&mut self, before: Route) {
        if self.router.route() != before {
            self.on_route_change();
        }
    }

    fn navigate(&mut self, route: Route) {
        let before = self.router.route();
        self.router.go(route);
        self.settle(before);
    }

    /// Advance every timer by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.uptime = self.uptime.saturating_add(elapsed);
        if self.exit_after.is_some_and(|limit| self.uptime >= limit) {
            tracing::info!(uptime_ms = self.uptime.as_millis() as u64, "exit timer reached");
            self.quit = true;
        }

        if let Some(page) = self.provider.tutorial().poll_navigation(elapsed) {
            let before = self.router.route();
            navigate_or_redirect(&mut self.router, page);
            self.settle(before);
        }

        let path = self.router.route().path();
        self.trigger.tick(elapsed, self.provider.tutorial(), path);
        self.launch.tick(elapsed, self.provider.tutorial(), path);
        self.overlay.tick(elapsed, &self.document);
        self.view().tick(elapsed);
    }

    /// Draw the current page and, on tour pages, the overlay.
    pub fn render(&mut self, size: Size) -> Buffer {
        let area = Rect::from_size(size.width.max(1), size.height.max(1));
        let mut buf = Buffer::new(area.width, area.height);
        self.document.reset(area);

        let ctx = RenderContext {
            tour_active: self.provider.tutorial().is_active(),
        };
        match self.router.route() {
            Route::Landing => self.landing.render(area, &mut buf, &mut self.document, ctx),
            Route::Tour(Page::Dashboard) => {
                self.dashboard.render(area, &mut buf, &mut self.document, ctx)
            }
            Route::Tour(Page::Profile) => {
                self.profile.render(area, &mut buf, &mut self.document, ctx)
            }
        }

        if self.router.route().page().is_some() {
            let store = self.provider.tutorial();
            self.overlay.sync(store, &self.document);
            self.overlay.render(store, &mut buf);
        }
        buf
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Tick(elapsed) = event {
            self.tick(*elapsed);
            return;
        }
        if let Event::Key(key) = event
            && key.is_press()
            && (key.is_char('q') || (key.ctrl() && key.is_char('c')))
        {
            self.quit = true;
            return;
        }

        if self.router.route().page().is_some() {
            let store = self.provider.tutorial();
            if let EventResult::Consumed(change) = self.overlay.handle_event(event, store) {
                if let Some(change) = change {
                    tracing::debug!(?change, state = ?store.state(), "tour input");
                }
                return;
            }
        }

        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Backspace
        {
            let before = self.router.route();
            if self.router.back().is_some() {
                self.settle(before);
            }
            return;
        }

        let Some(action) = self.view().handle_event(event) else {
            return;
        };
        match action {
            PageAction::Navigate(route) => self.navigate(route),
            PageAction::StartTour => {
                self.navigate(Route::Tour(Page::Dashboard));
                self.provider.tutorial().start();
                self.overlay.invalidate();
            }
            PageAction::LaunchTour => {
                let before = self.router.route();
                let outcome = self.launch.launch(&mut self.router);
                tracing::debug!(?outcome, "landing launch");
                self.settle(before);
            }
        }
    }
}

/// The tour's storage backend for these options.
pub fn open_storage(opts: &Opts) -> Box<dyn KeyValueStore> {
    let storage: Box<dyn KeyValueStore> = if opts.memory_state {
        Box::new(MemoryStorage::new())
    } else {
        match &opts.state_file {
            Some(path) => Box::new(FileStorage::new(path)),
            None => Box::new(FileStorage::default_location()),
        }
    };
    if opts.reset_tour {
        match storage.remove(SEEN_KEY) {
            Ok(()) => tracing::info!(backend = storage.name(), "tour state reset"),
            Err(error) => tracing::warn!(backend = storage.name(), %error, "failed to reset tour state"),
        }
    }
    storage
}

/// Run the demo in the terminal until the user quits.
pub fn run(opts: &Opts) -> Result<(), DemoError> {
    let store = TutorialStore::new(open_storage(opts));
    let mut app = App::new(store, AppConfig::from(opts))?;

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: opts.mouse,
    })?;
    let mut presenter = Presenter::new(io::stdout());
    let mut last = Instant::now();

    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;

        let frame = app.render(session.size()?);
        presenter.present(&frame)?;

        if let Some(event) = session.poll_event(FRAME_INTERVAL)? {
            if matches!(event, Event::Resize { .. }) {
                presenter.invalidate();
            }
            app.handle_event(&event);
        }
    }
    tracing::info!("demo exiting");
    Ok(())
}
