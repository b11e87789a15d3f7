#![forbid(unsafe_code)]

//! The demo's pages.
//!
//! Each page draws itself, registers the elements the tour can point at in
//! the frame's [`StaticDocument`], and turns input into [`PageAction`]s for
//! the app.

pub mod dashboard;
pub mod landing;
pub mod profile;

use std::time::Duration;

use zip_core::event::Event;
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_tour::locator::StaticDocument;

use crate::route::Route;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use profile::ProfilePage;

/// Something only the app can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Navigate(Route),
    /// Start the tour in place ("Show Tutorial").
    StartTour,
    /// Landing call-to-action: go to the dashboard, then start the tour.
    LaunchTour,
}

/// Per-frame facts a page needs from the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    pub tour_active: bool,
}

pub trait View {
    /// Called every time the page becomes the current route.
    fn on_load(&mut self) {}

    fn tick(&mut self, _elapsed: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument, ctx: RenderContext);

    /// Input the tour overlay did not consume.
    fn handle_event(&mut self, event: &Event) -> Option<PageAction>;
}
