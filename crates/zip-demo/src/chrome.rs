#![forbid(unsafe_code)]

//! Shared page chrome: the top navigation bar, click regions, and anchor
//! registration.

use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::style::{Style, palette};
use zip_tour::locator::{Document, Node, StaticDocument};
use zip_tour::page::Page;
use zip_widgets::block::{Block, Borders};
use zip_widgets::{Widget, draw_label, text_width};

use crate::data::{USER_HANDLE, USER_NAME};
use crate::pages::PageAction;
use crate::route::Route;

/// Rows taken by the navigation bar.
pub const HEADER_HEIGHT: u16 = 3;
pub const SEARCH_PLACEHOLDER: &str = "Search for an account or paste tweet link";
pub const TUTORIAL_BUTTON_LABEL: &str = "? Show Tutorial";

/// Clickable regions recorded while rendering. Later regions win.
#[derive(Debug, Clone)]
pub struct HitMap<A> {
    regions: Vec<(Rect, A)>,
}

impl<A> Default for HitMap<A> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<A: Copy> HitMap<A> {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, action: A) {
        if !area.is_empty() {
            self.regions.push((area, action));
        }
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<A> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(x, y))
            .map(|(_, action)| *action)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Add `node` to the document, clipped to the viewport. Off-screen nodes
/// are left out so the tour falls back instead of pointing at nothing.
pub fn register(doc: &mut StaticDocument, mut node: Node) {
    let Some(visible) = node.bounds.intersection_opt(&doc.viewport()) else {
        return;
    };
    node.bounds = visible;
    doc.push(node);
}

/// Draw the navigation bar for a tour page and register its anchors.
pub fn render_header(
    area: Rect,
    buf: &mut Buffer,
    doc: &mut StaticDocument,
    hits: &mut HitMap<PageAction>,
    current: Page,
    show_tutorial_button: bool,
) {
    let area = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height));
    Block::new()
        .borders(Borders::BOTTOM)
        .border_style(Style::new().fg(palette::ZIP_GREEN_DARK))
        .style(Style::new().bg(palette::BACKGROUND))
        .render(area, buf);
    register(doc, Node::new("nav", area));
    if area.height < 2 {
        return;
    }

    let row = area.y + 1;
    let logo = Rect::new(area.x + 2, row, area.width.saturating_sub(2), 1);
    let logo_end = draw_label(buf, logo, "ZIP ON PLASMA", Style::new().fg(palette::ZIP_GREEN).bold());

    // Right side, laid out right to left.
    let mut right = area.right().saturating_sub(2);
    let (link_label, link_href, link_route) = match current {
        Page::Dashboard => (
            format!("◉ {USER_NAME} {USER_HANDLE}"),
            "/profile",
            Route::Tour(Page::Profile),
        ),
        Page::Profile => (
            "← Dashboard".to_owned(),
            "/dashboard",
            Route::Tour(Page::Dashboard),
        ),
    };
    let link_w = text_width(&link_label) as u16;
    right = right.saturating_sub(link_w);
    let link = Rect::new(right, row, link_w, 1);
    draw_label(buf, link, &link_label, Style::new().fg(palette::TEXT));
    register(doc, Node::new("a", link).attr("href", link_href));
    hits.push(link, PageAction::Navigate(link_route));

    if show_tutorial_button {
        let w = text_width(TUTORIAL_BUTTON_LABEL) as u16;
        right = right.saturating_sub(w + 3);
        let button = Rect::new(right, row, w, 1);
        draw_label(buf, button, TUTORIAL_BUTTON_LABEL, Style::new().fg(palette::ZIP_GREEN));
        register(doc, Node::new("button", button).attr("aria-label", "Start tutorial"));
        hits.push(button, PageAction::StartTour);
    }

    // Search box fills the space between the logo and the right side.
    let left = logo_end.saturating_add(3);
    let available = right.saturating_sub(left).saturating_sub(3);
    if available >= 12 {
        let w = available.min(text_width(SEARCH_PLACEHOLDER) as u16 + 4);
        let search = Rect::new(left, row, w, 1);
        buf.set_style(search, Style::new().bg(palette::SURFACE));
        let text = Rect::new(left + 2, row, w.saturating_sub(4), 1);
        draw_label(buf, text, SEARCH_PLACEHOLDER, Style::new().fg(palette::MUTED));
        register(doc, Node::new("input", search).attr("placeholder", SEARCH_PLACEHOLDER));
    }
}
