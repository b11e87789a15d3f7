#![forbid(unsafe_code)]

//! The tour overlay: dimmed backdrop, spotlight, and tooltip card.
//!
//! The controller is driven once per frame:
//!
//! 1. The page renders into the buffer and registers its anchors in a
//!    [`Document`].
//! 2. [`OverlayController::sync`] locates the displayed step's anchor and
//!    lays out the tooltip. The layout is cached until the step, the
//!    anchor, or the viewport changes, or [`OverlayController::invalidate`]
//!    is called (scroll).
//! 3. [`OverlayController::render`] draws on top of the page.
//!
//! Input goes through [`OverlayController::handle_event`] before the page
//! sees it.
//!
//! # Invariants
//!
//! 1. Nothing is drawn or consumed unless the store has a displayed step
//!    (active, and the step's page is the current page).
//! 2. Cells inside the spotlight are left untouched and clicks there pass
//!    through to the page.
//! 3. The tooltip stays inside the viewport.

use std::time::Duration;

use zip_core::event::{Event, KeyCode, MouseEventKind};
use zip_core::geometry::{Rect, Sides, Size};
use zip_render::buffer::Buffer;
use zip_render::cell::StyleFlags;
use zip_render::style::{Style, palette};
use zip_widgets::block::{Block, BorderType};
use zip_widgets::paragraph::{Paragraph, wrap_text};
use zip_widgets::{Widget, draw_label, text_width};

use crate::locator::{Document, TargetLocator};
use crate::positioner::{PlacementMetrics, TooltipLayout, place};
use crate::step::TutorialStep;
use crate::store::{TourEvent, TutorialStore};

/// Widest tooltip, in cells.
pub const DEFAULT_MAX_WIDTH: u16 = 48;
const MIN_WIDTH: u16 = 24;
/// Borders plus title, progress, two spacer rows, and the button row.
const CHROME_ROWS: u16 = 7;

/// Overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Showing { step: usize },
}

/// What a tooltip button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Close,
    Skip,
    Previous,
    Next,
}

/// A clickable region of the tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub action: OverlayAction,
    pub label: &'static str,
    pub area: Rect,
}

/// Whether the overlay used an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Pass the event on to the page.
    Ignored,
    /// The overlay handled it, possibly changing the tour.
    Consumed(Option<TourEvent>),
}

/// Label of the primary button for the step at `index`.
pub fn primary_label(step: &TutorialStep, index: usize, total: usize) -> &'static str {
    if index + 1 >= total {
        "Finish"
    } else if step.page_transition {
        "Continue"
    } else {
        "Next"
    }
}

/// Progress text shown under the title.
pub fn progress_label(index: usize, total: usize) -> String {
    format!("{} of {}", index + 1, total)
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    locator: TargetLocator,
    metrics: PlacementMetrics,
    shown: Option<usize>,
    viewport: Rect,
    layout: Option<TooltipLayout>,
    buttons: Vec<Button>,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(PlacementMetrics::CELLS)
    }
}

impl OverlayController {
    pub fn new(metrics: PlacementMetrics) -> Self {
        Self {
            locator: TargetLocator::new(),
            metrics,
            shown: None,
            viewport: Rect::default(),
            layout: None,
            buttons: Vec::new(),
        }
    }

    pub fn state(&self, store: &TutorialStore) -> OverlayState {
        match store.displayed_step() {
            Some(_) => OverlayState::Showing {
                step: store.step_index(),
            },
            None => OverlayState::Hidden,
        }
    }

    pub fn layout(&self) -> Option<&TooltipLayout> {
        self.layout.as_ref()
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn locator(&self) -> &TargetLocator {
        &self.locator
    }

    /// Drop the cached layout; the next [`sync`](Self::sync) re-reads the
    /// anchor bounds.
    pub fn invalidate(&mut self) {
        self.layout = None;
    }

    /// Bring the overlay in line with the store and the page document.
    pub fn sync(&mut self, store: &TutorialStore, document: &dyn Document) {
        let Some(step) = store.displayed_step() else {
            if self.shown.take().is_some() {
                self.locator.reset();
                self.layout = None;
                self.buttons.clear();
            }
            return;
        };
        let index = store.step_index();

        if self.shown != Some(index) {
            self.locator.locate(step, document);
            self.shown = Some(index);
            self.layout = None;
        }

        let viewport = document.viewport();
        if viewport != self.viewport {
            self.viewport = viewport;
            self.layout = None;
        }

        if self.layout.is_none() {
            self.locator.refresh(document);
            self.relayout(step, index, store.step_count());
        }
    }

    /// Advance the locator retry. Returns `true` if the anchor changed.
    pub fn tick(&mut self, elapsed: Duration, document: &dyn Document) -> bool {
        let changed = self.locator.tick(elapsed, document);
        if changed {
            self.layout = None;
        }
        changed
    }

    fn tooltip_size(&self, step: &TutorialStep) -> Size {
        let viewport = self.viewport;
        let room = viewport
            .width
            .saturating_sub(self.metrics.margin.saturating_mul(2));
        let width = DEFAULT_MAX_WIDTH.min(room).max(MIN_WIDTH).min(viewport.width);
        let lines = wrap_text(step.content, width.saturating_sub(4) as usize).len();
        let height = (lines as u16)
            .saturating_add(CHROME_ROWS)
            .min(viewport.height);
        Size::new(width, height)
    }

    fn relayout(&mut self, step: &TutorialStep, index: usize, total: usize) {
        let size = self.tooltip_size(step);
        let anchor = self.locator.anchor().map(|a| a.bounds);
        let layout = place(anchor, step.position, size, self.viewport, self.metrics);
        tracing::trace!(
            step = step.id,
            x = layout.area.x,
            y = layout.area.y,
            w = layout.area.width,
            h = layout.area.height,
            spotlight = layout.spotlight.is_some(),
            "tooltip laid out"
        );
        self.buttons = button_regions(layout.area, step, index, total);
        self.layout = Some(layout);
    }

    fn hit(&self, x: u16, y: u16) -> Option<OverlayAction> {
        self.buttons
            .iter()
            .find(|b| b.area.contains(x, y))
            .map(|b| b.action)
    }

    fn apply(&mut self, action: OverlayAction, store: &mut TutorialStore) -> Option<TourEvent> {
        let event = match action {
            OverlayAction::Close => store.close(),
            OverlayAction::Skip => store.skip(),
            OverlayAction::Previous => {
                let allowed = store.current_step().is_some_and(|s| s.show_previous);
                if allowed { store.retreat() } else { None }
            }
            OverlayAction::Next => store.advance(),
        };
        if event.is_some() {
            // Force a fresh lookup even if the index repeats (restart).
            self.shown = None;
            self.layout = None;
        }
        event
    }

    /// Route an input event through the overlay.
    pub fn handle_event(&mut self, event: &Event, store: &mut TutorialStore) -> EventResult {
        match event {
            Event::Resize { .. } => {
                self.invalidate();
                return EventResult::Ignored;
            }
            _ if event.is_scroll() => {
                self.invalidate();
                return EventResult::Ignored;
            }
            _ => {}
        }

        let Some(step) = store.displayed_step().copied() else {
            return EventResult::Ignored;
        };

        match event {
            Event::Key(key) if key.is_press() => {
                let action = match key.code {
                    KeyCode::Escape => OverlayAction::Close,
                    KeyCode::Right | KeyCode::Enter => OverlayAction::Next,
                    KeyCode::Left if step.show_previous && store.step_index() > 0 => {
                        OverlayAction::Previous
                    }
                    _ => return EventResult::Ignored,
                };
                EventResult::Consumed(self.apply(action, store))
            }
            Event::Mouse(mouse) if mouse.is_left_click() => {
                if let Some(action) = self.hit(mouse.x, mouse.y) {
                    return EventResult::Consumed(self.apply(action, store));
                }
                let Some(layout) = self.layout.as_ref() else {
                    return EventResult::Ignored;
                };
                if layout.area.contains(mouse.x, mouse.y) {
                    return EventResult::Consumed(None);
                }
                if layout
                    .spotlight
                    .is_some_and(|spot| spot.contains(mouse.x, mouse.y))
                {
                    return EventResult::Ignored;
                }
                if step.position.is_center() {
                    EventResult::Consumed(None)
                } else {
                    EventResult::Consumed(self.apply(OverlayAction::Close, store))
                }
            }
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Up(_)) =>
            {
                EventResult::Ignored
            }
            Event::Mouse(_) => EventResult::Consumed(None),
            _ => EventResult::Ignored,
        }
    }

    /// Draw the overlay over an already-rendered page.
    pub fn render(&self, store: &TutorialStore, buf: &mut Buffer) {
        let (Some(step), Some(layout)) = (store.displayed_step(), self.layout.as_ref()) else {
            return;
        };
        let _span = tracing::trace_span!("overlay_render", step = step.id).entered();

        dim_backdrop(buf, layout.spotlight);

        let area = layout.area.intersection(&buf.area());
        if area.is_empty() {
            return;
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(palette::ZIP_GREEN_DARK).bg(palette::SURFACE))
            .style(Style::new().fg(palette::TEXT).bg(palette::SURFACE));
        block.render(area, buf);

        if let Some(arrow) = layout.arrow {
            if let Some(cell) = buf.get_mut(arrow.x, arrow.y) {
                cell.ch = arrow.glyph;
                cell.fg = palette::ZIP_GREEN;
            }
        }

        let content = block.inner(area).inner(Sides::horizontal(1));
        if content.is_empty() {
            return;
        }
        let index = store.step_index();
        let total = store.step_count();

        let title_area = Rect::new(content.x, content.y, content.width.saturating_sub(2), 1);
        draw_label(buf, title_area, step.title, Style::new().fg(palette::TEXT).bold());

        if content.height > 1 {
            let progress = progress_label(index, total);
            let row = Rect::new(content.x, content.y + 1, content.width, 1);
            let end = draw_label(buf, row, &progress, Style::new().fg(palette::MUTED));
            let mut x = end.saturating_add(1);
            for i in 0..total {
                if x >= content.right() {
                    break;
                }
                let (glyph, color) = if i <= index {
                    ("●", palette::ZIP_GREEN)
                } else {
                    ("•", palette::ZIP_GREEN_DARK.darken(0.5))
                };
                x = buf.set_string(x, row.y, glyph, Style::new().fg(color), content.right());
            }
        }

        let body_height = content.height.saturating_sub(5);
        if body_height > 0 {
            let body = Rect::new(content.x, content.y + 3, content.width, body_height);
            Paragraph::new(step.content)
                .style(Style::new().fg(palette::TEXT))
                .render(body, buf);
        }

        for button in &self.buttons {
            let style = match button.action {
                OverlayAction::Next => Style::new()
                    .fg(palette::BACKGROUND)
                    .bg(palette::ZIP_GREEN)
                    .bold(),
                OverlayAction::Previous => Style::new().fg(palette::TEXT),
                OverlayAction::Skip | OverlayAction::Close => Style::new().fg(palette::MUTED),
            };
            let padded = if button.area.width as usize > text_width(button.label) {
                format!(" {} ", button.label)
            } else {
                button.label.to_owned()
            };
            draw_label(buf, button.area.intersection(&area), &padded, style);
        }
    }
}

fn dim_backdrop(buf: &mut Buffer, spotlight: Option<Rect>) {
    let area = buf.area();
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if spotlight.is_some_and(|spot| spot.contains(x, y)) {
                continue;
            }
            if let Some(cell) = buf.get_mut(x, y) {
                cell.fg = if cell.fg.a() == 0 {
                    palette::MUTED.darken(0.6)
                } else {
                    cell.fg.darken(0.4)
                };
                cell.bg = cell.bg.darken(0.3);
                cell.attrs |= StyleFlags::DIM;
            }
        }
    }
}

fn button_regions(area: Rect, step: &TutorialStep, index: usize, total: usize) -> Vec<Button> {
    let inner = Block::bordered().inner(area).inner(Sides::horizontal(1));
    if inner.is_empty() {
        return Vec::new();
    }
    let mut buttons = vec![Button {
        action: OverlayAction::Close,
        label: "×",
        area: Rect::new(inner.right().saturating_sub(1), inner.y, 1, 1),
    }];
    if inner.height < 2 {
        return buttons;
    }

    let row = inner.bottom() - 1;
    let width_of = |label: &str| (text_width(label) as u16).saturating_add(2);

    if step.show_skip {
        let label = "Skip tour";
        buttons.push(Button {
            action: OverlayAction::Skip,
            label,
            area: Rect::new(inner.x, row, width_of(label).min(inner.width), 1),
        });
    }

    let label = primary_label(step, index, total);
    let w = width_of(label).min(inner.width);
    let mut right = inner.right().saturating_sub(w);
    buttons.push(Button {
        action: OverlayAction::Next,
        label,
        area: Rect::new(right, row, w, 1),
    });

    if step.show_previous && index > 0 {
        let label = "Previous";
        let w = width_of(label);
        right = right.saturating_sub(w.saturating_add(1)).max(inner.x);
        buttons.push(Button {
            action: OverlayAction::Previous,
            label,
            area: Rect::new(right, row, w, 1),
        });
    }
    buttons
}
