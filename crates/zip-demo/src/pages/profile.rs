#![forbid(unsafe_code)]

//! Profile: overview, earnings with the claim button, top zips, and the
//! latest posts.
//!
//! The claim button appears a moment after the page loads, the way it
//! animates in on the web, so the tour has to find it on its retry.

use std::time::Duration;

use zip_core::event::{Event, KeyCode};
use zip_core::geometry::{Rect, Sides};
use zip_render::buffer::Buffer;
use zip_render::style::{Style, palette};
use zip_tour::locator::{Node, StaticDocument};
use zip_tour::page::Page;
use zip_widgets::block::{Block, BorderType};
use zip_widgets::paragraph::Paragraph;
use zip_widgets::{Widget, draw_label, text_width};

use super::{PageAction, RenderContext, View};
use crate::chrome::{HEADER_HEIGHT, HitMap, register, render_header};
use crate::data::{LATEST_POSTS, Post, TOP_ZIPS, TOTAL_EARNINGS, USER_HANDLE, USER_NAME, thousands};
use crate::route::Route;

/// Delay before the claim button is drawn.
pub const CLAIM_BUTTON_REVEAL: Duration = Duration::from_millis(150);
const CLAIM_LABEL: &str = "Claim Earnings";
const OVERVIEW_HEIGHT: u16 = 5;
const EARNINGS_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Claim,
}

#[derive(Debug)]
pub struct ProfilePage {
    since_load: Duration,
    claim_notice: bool,
    tutorial_button: bool,
    chrome: HitMap<PageAction>,
    hits: HitMap<Hit>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

fn section<'a>(title: &'a str) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(palette::ZIP_GREEN_DARK))
        .title(title)
        .style(Style::new().bg(palette::BACKGROUND))
}

fn render_posts(posts: &[Post], area: Rect, buf: &mut Buffer) {
    let mut y = area.y;
    for post in posts {
        if y + 1 >= area.bottom() {
            break;
        }
        let text_height = Paragraph::new(post.text)
            .line_count(area.width)
            .min(area.bottom() - y - 1)
            .min(2);
        let text = Rect::new(area.x, y, area.width, text_height);
        Paragraph::new(post.text)
            .style(Style::new().fg(palette::TEXT))
            .render(text, buf);
        y += text_height;
        let meta = format!("{} ZIPS · {}", thousands(post.zips), post.posted);
        draw_label(buf, Rect::new(area.x, y, area.width, 1), &meta, Style::new().fg(palette::ZIP_GREEN));
        y += 2;
    }
}

impl ProfilePage {
    pub fn new() -> Self {
        Self {
            since_load: Duration::ZERO,
            claim_notice: false,
            tutorial_button: false,
            chrome: HitMap::default(),
            hits: HitMap::default(),
        }
    }

    pub fn claim_button_visible(&self) -> bool {
        self.since_load >= CLAIM_BUTTON_REVEAL
    }

    fn render_overview(&self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument) {
        let block = section("Profile");
        block.render(area, buf);
        register(doc, Node::new("section", area).tutorial("profile-overview"));
        let inner = block.inner(area).inner(Sides::horizontal(1));
        if inner.height < 2 {
            return;
        }
        let name = format!("{USER_NAME} ✩");
        draw_label(buf, inner, &name, Style::new().fg(palette::TEXT).bold());
        let row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let end = draw_label(buf, row, USER_HANDLE, Style::new().fg(palette::MUTED));
        let status = Rect::new(end + 2, row.y, row.right().saturating_sub(end + 2), 1);
        draw_label(buf, status, "● Connected", Style::new().fg(palette::ZIP_GREEN));
    }

    fn render_earnings(&mut self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument) {
        let block = section("Your Earnings");
        block.render(area, buf);
        register(doc, Node::new("div", area).tutorial("earnings-display"));
        let inner = block.inner(area).inner(Sides::horizontal(1));
        if inner.height < 2 {
            return;
        }
        draw_label(buf, inner, "Total Earnings", Style::new().fg(palette::MUTED));
        let total = format!("{} ZIPS", thousands(TOTAL_EARNINGS));
        let row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let end = draw_label(buf, row, &total, Style::new().fg(palette::ZIP_GREEN).bold());
        let usd = Rect::new(end + 1, row.y, row.right().saturating_sub(end + 1), 1);
        draw_label(buf, usd, "($6,940)", Style::new().fg(palette::TEXT));

        if inner.height < 4 {
            return;
        }
        let y = inner.y + 3;
        if self.claim_button_visible() {
            let w = (text_width(CLAIM_LABEL) as u16 + 4).min(inner.width);
            let button = Rect::new(inner.x, y, w, 1);
            let style = Style::new().fg(palette::TEXT).bg(palette::ZIP_GREEN).bold();
            buf.set_style(button, style);
            draw_label(buf, Rect::new(inner.x + 2, y, w.saturating_sub(4), 1), CLAIM_LABEL, style);
            register(doc, Node::new("button", button).tutorial("claim-button"));
            self.hits.push(button, Hit::Claim);
        }
        if self.claim_notice && inner.height > 4 {
            let note = Rect::new(inner.x, y + 1, inner.width, 1);
            draw_label(buf, note, "Claiming is disabled in this demo", Style::new().fg(palette::MUTED));
        }
    }
}

impl View for ProfilePage {
    fn on_load(&mut self) {
        self.since_load = Duration::ZERO;
        self.claim_notice = false;
    }

    fn tick(&mut self, elapsed: Duration) {
        self.since_load = self.since_load.saturating_add(elapsed);
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument, ctx: RenderContext) {
        self.chrome.clear();
        self.hits.clear();
        self.tutorial_button = !ctx.tour_active;
        buf.set_style(area, Style::new().bg(palette::BACKGROUND));

        render_header(area, buf, doc, &mut self.chrome, Page::Profile, self.tutorial_button);

        let body = Rect::new(
            area.x + 2,
            area.y + HEADER_HEIGHT + 1,
            area.width.saturating_sub(4),
            area.height.saturating_sub(HEADER_HEIGHT + 2),
        );
        if body.is_empty() {
            return;
        }
        let left_w = (body.width * 45 / 100).max(36).min(body.width);
        let left = Rect::new(body.x, body.y, left_w, body.height);
        let right = Rect::new(
            body.x + left_w + 2,
            body.y,
            body.width.saturating_sub(left_w + 2),
            body.height,
        );

        let overview = Rect::new(left.x, left.y, left.width, OVERVIEW_HEIGHT.min(left.height));
        self.render_overview(overview, buf, doc);

        let below = left.height.saturating_sub(OVERVIEW_HEIGHT);
        let earnings = Rect::new(left.x, overview.bottom(), left.width, EARNINGS_HEIGHT.min(below));
        if !earnings.is_empty() {
            self.render_earnings(earnings, buf, doc);
        }

        let rest = below.saturating_sub(EARNINGS_HEIGHT);
        let top = Rect::new(left.x, earnings.bottom(), left.width, rest);
        if !top.is_empty() {
            let block = section("Top Zips");
            block.render(top, buf);
            register(doc, Node::new("div", top).tutorial("top-zips"));
            render_posts(TOP_ZIPS, block.inner(top).inner(Sides::horizontal(1)), buf);
        }

        if !right.is_empty() {
            let block = section("Your Latest Posts");
            block.render(right, buf);
            register(doc, Node::new("div", right).tutorial("latest-posts"));
            render_posts(LATEST_POSTS, block.inner(right).inner(Sides::horizontal(1)), buf);
        }

        if area.height > HEADER_HEIGHT + 1 {
            let hint = Rect::new(body.x, area.bottom() - 1, body.width, 1);
            draw_label(
                buf,
                hint,
                "c claim · t tutorial · d dashboard · Backspace back · q quit",
                Style::new().fg(palette::MUTED),
            );
        }
    }

    fn handle_event(&mut self, event: &Event) -> Option<PageAction> {
        match event {
            Event::Key(key) if key.is_press() => match key.code {
                KeyCode::Char('c') if self.claim_button_visible() => {
                    self.claim_notice = true;
                    None
                }
                KeyCode::Char('t') if self.tutorial_button => Some(PageAction::StartTour),
                KeyCode::Char('d') => Some(PageAction::Navigate(Route::Tour(Page::Dashboard))),
                _ => None,
            },
            Event::Mouse(mouse) if mouse.is_left_click() => {
                if let Some(action) = self.chrome.hit(mouse.x, mouse.y) {
                    return Some(action);
                }
                if self.hits.hit(mouse.x, mouse.y) == Some(Hit::Claim) {
                    self.claim_notice = true;
                }
                None
            }
            _ => None,
        }
    }
}
