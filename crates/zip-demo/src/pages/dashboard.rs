#![forbid(unsafe_code)]

//! Dashboard: trending tabs, time filters, and the content feed.

use zip_core::event::{Event, KeyCode};
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::cell::StyleFlags;
use zip_render::style::{Style, palette};
use zip_tour::locator::{Node, StaticDocument};
use zip_tour::page::Page;
use zip_widgets::{draw_label, text_width};

use super::{PageAction, RenderContext, View};
use crate::chrome::{HEADER_HEIGHT, HitMap, register, render_header};
use crate::data::{INFLUENCERS, thousands, trend_label};
use crate::route::Route;

pub const TABS: [&str; 3] = ["TRENDING", "MOST ZIPPED TWEETS", "MOST ZIPPED ACCOUNTS"];
pub const TIME_FILTERS: [&str; 4] = ["1h", "4h", "24h", "7d"];
const ACTIVE_TAB_CLASS: &str = "font-bold text-[#5fb574]";
const IDLE_TAB_CLASS: &str = "font-bold text-[#71767b]";
const ACTIVE_FILTER_CLASS: &str = "rounded-lg bg-[#5fb574] text-white";
const IDLE_FILTER_CLASS: &str = "rounded-lg bg-[#4a9b5f]/20 text-[#5fb574]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Tab(usize),
    Filter(usize),
}

#[derive(Debug)]
pub struct DashboardPage {
    tab: usize,
    filter: usize,
    tutorial_button: bool,
    chrome: HitMap<PageAction>,
    hits: HitMap<Hit>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            tab: 0,
            filter: 2,
            tutorial_button: false,
            chrome: HitMap::default(),
            hits: HitMap::default(),
        }
    }

    pub fn tab(&self) -> usize {
        self.tab
    }

    pub fn time_filter(&self) -> &'static str {
        TIME_FILTERS[self.filter]
    }

    fn render_tabs(&mut self, row: Rect, buf: &mut Buffer, doc: &mut StaticDocument) {
        let mut x = row.x;
        let mut tabs = Vec::with_capacity(TABS.len());
        for (i, label) in TABS.iter().enumerate() {
            let w = text_width(label) as u16;
            tabs.push((i, Rect::new(x, row.y, w, 1).intersection(&row)));
            x = x.saturating_add(w + 3);
        }
        let strip = Rect::new(row.x, row.y, x.saturating_sub(3).saturating_sub(row.x), 1);
        register(
            doc,
            Node::new("div", strip)
                .tutorial("tab-navigation")
                .attr("class", "flex gap-8"),
        );
        for (i, rect) in tabs {
            let active = i == self.tab;
            let style = if active {
                Style::new()
                    .fg(palette::ZIP_GREEN)
                    .bold()
                    .flags(StyleFlags::UNDERLINE)
            } else {
                Style::new().fg(palette::MUTED).bold()
            };
            draw_label(buf, rect, TABS[i], style);
            let class = if active { ACTIVE_TAB_CLASS } else { IDLE_TAB_CLASS };
            register(doc, Node::new("button", rect).attr("class", class));
            self.hits.push(rect, Hit::Tab(i));
        }
    }

    fn render_filters(&mut self, row: Rect, buf: &mut Buffer, doc: &mut StaticDocument) {
        let width: u16 = TIME_FILTERS
            .iter()
            .map(|f| text_width(f) as u16 + 2)
            .sum::<u16>()
            + (TIME_FILTERS.len() as u16 - 1);
        if row.width < width {
            return;
        }
        let strip = Rect::new(row.right() - width, row.y, width, 1);
        register(
            doc,
            Node::new("div", strip)
                .tutorial("time-filters")
                .attr("class", "flex gap-2 flex-wrap"),
        );
        let mut x = strip.x;
        for (i, label) in TIME_FILTERS.iter().enumerate() {
            let w = text_width(label) as u16 + 2;
            let chip = Rect::new(x, row.y, w, 1);
            let active = i == self.filter;
            let style = if active {
                Style::new().fg(palette::TEXT).bg(palette::ZIP_GREEN).bold()
            } else {
                Style::new().fg(palette::ZIP_GREEN).bg(palette::SURFACE)
            };
            buf.set_style(chip, style);
            draw_label(buf, Rect::new(x + 1, row.y, w - 2, 1), label, style);
            let class = if active { ACTIVE_FILTER_CLASS } else { IDLE_FILTER_CLASS };
            register(doc, Node::new("button", chip).attr("class", class));
            self.hits.push(chip, Hit::Filter(i));
            x += w + 1;
        }
    }

    fn render_feed(&self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument) {
        if area.is_empty() {
            return;
        }
        register(
            doc,
            Node::new("div", area)
                .tutorial("content-feed")
                .attr("class", "space-y-4"),
        );
        let rows = INFLUENCERS.iter().take(area.height as usize);
        for (rank, influencer) in rows.enumerate() {
            let y = area.y + rank as u16;
            let row = Rect::new(area.x, y, area.width, 1);
            let zips = match self.tab {
                2 => influencer.zips.saturating_mul(3),
                _ => influencer.zips,
            };
            let right = match self.tab {
                1 => format!("{} ZIPS  {:>4}", thousands(zips), influencer.posted),
                _ => format!("{} ZIPS  {:>5}", thousands(zips), trend_label(influencer.trend)),
            };

            let rank_style = if rank < 3 {
                Style::new().fg(palette::ZIP_GREEN).bold()
            } else {
                Style::new().fg(palette::MUTED)
            };
            let mut x = draw_label(buf, row, &format!("#{:<3}", rank + 1), rank_style);
            x = draw_label(
                buf,
                Rect::new(x, y, row.right().saturating_sub(x), 1),
                influencer.display_name,
                Style::new().fg(palette::TEXT).bold(),
            );
            draw_label(
                buf,
                Rect::new(x + 1, y, row.right().saturating_sub(x + 1), 1),
                influencer.username,
                Style::new().fg(palette::MUTED),
            );

            let w = text_width(&right) as u16;
            if w + 30 <= area.width {
                let rect = Rect::new(row.right() - w, y, w, 1);
                draw_label(buf, rect, &right, Style::new().fg(palette::ZIP_GREEN));
            }
        }
    }
}

impl View for DashboardPage {
    fn render(&mut self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument, ctx: RenderContext) {
        self.chrome.clear();
        self.hits.clear();
        self.tutorial_button = !ctx.tour_active;
        buf.set_style(area, Style::new().bg(palette::BACKGROUND));

        render_header(area, buf, doc, &mut self.chrome, Page::Dashboard, self.tutorial_button);

        let body = Rect::new(
            area.x + 2,
            area.y + HEADER_HEIGHT + 1,
            area.width.saturating_sub(4),
            area.height.saturating_sub(HEADER_HEIGHT + 2),
        );
        if body.height == 0 {
            return;
        }
        let tabs_row = Rect::new(body.x, body.y, body.width, 1);
        self.render_tabs(tabs_row, buf, doc);
        if self.tab == 0 {
            self.render_filters(tabs_row, buf, doc);
        }

        let feed = Rect::new(
            body.x,
            body.y + 2,
            body.width,
            body.height.saturating_sub(3),
        );
        self.render_feed(feed, buf, doc);

        let hint = Rect::new(body.x, area.bottom() - 1, body.width, 1);
        draw_label(
            buf,
            hint,
            "Tab view · f time filter · t tutorial · p profile · Backspace back · q quit",
            Style::new().fg(palette::MUTED),
        );
    }

    fn handle_event(&mut self, event: &Event) -> Option<PageAction> {
        match event {
            Event::Key(key) if key.is_press() => match key.code {
                KeyCode::Tab => {
                    self.tab = (self.tab + 1) % TABS.len();
                    None
                }
                KeyCode::BackTab => {
                    self.tab = (self.tab + TABS.len() - 1) % TABS.len();
                    None
                }
                KeyCode::Char('f') if self.tab == 0 => {
                    self.filter = (self.filter + 1) % TIME_FILTERS.len();
                    None
                }
                KeyCode::Char('t') if self.tutorial_button => Some(PageAction::StartTour),
                KeyCode::Char('p') => Some(PageAction::Navigate(Route::Tour(Page::Profile))),
                _ => None,
            },
            Event::Mouse(mouse) if mouse.is_left_click() => {
                if let Some(action) = self.chrome.hit(mouse.x, mouse.y) {
                    return Some(action);
                }
                match self.hits.hit(mouse.x, mouse.y)? {
                    Hit::Tab(i) => self.tab = i,
                    Hit::Filter(i) => self.filter = i,
                }
                None
            }
            _ => None,
        }
    }
}
