#![forbid(unsafe_code)]

//! Landing page: pitch, call-to-action, and a short leaderboard.

use zip_core::event::{Event, KeyCode};
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::style::{Style, palette};
use zip_tour::locator::{Node, StaticDocument};
use zip_widgets::{draw_label, text_width};

use super::{PageAction, RenderContext, View};
use crate::chrome::{HitMap, register};
use crate::data::{INFLUENCERS, thousands};

const LEADERBOARD_ROWS: usize = 5;
const CTA_LABELS: [&str; 2] = ["CONTINUE WITH 𝕏", "CONTINUE WITH WALLET"];

#[derive(Debug, Default)]
pub struct LandingPage {
    hits: HitMap<PageAction>,
}

impl LandingPage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn centered(area: Rect, y: u16, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, y, width, 1)
}

fn line(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) -> Rect {
    let rect = centered(area, y, text_width(text) as u16);
    if y < area.bottom() {
        draw_label(buf, rect, text, style);
    }
    rect
}

impl View for LandingPage {
    fn render(&mut self, area: Rect, buf: &mut Buffer, doc: &mut StaticDocument, _ctx: RenderContext) {
        self.hits.clear();
        buf.set_style(area, Style::new().bg(palette::BACKGROUND));
        let mut y = area.y + 2;

        line(buf, area, y, "ZIP ON PLASMA", Style::new().fg(palette::ZIP_GREEN).bold());
        y += 3;
        line(buf, area, y, "Zero-fee tips for the social web", Style::new().fg(palette::TEXT).bold());
        y += 3;

        let widths = CTA_LABELS.map(|label| text_width(label) as u16 + 4);
        let total = widths[0] + widths[1] + 4;
        let row = centered(area, y, total);
        let mut x = row.x;
        for (i, label) in CTA_LABELS.iter().enumerate() {
            let button = Rect::new(x, y, widths[i], 1).intersection(&area);
            let style = if i == 0 {
                Style::new().fg(palette::TEXT).bg(palette::ZIP_GREEN_DARK).bold()
            } else {
                Style::new().fg(palette::TEXT).bg(palette::SURFACE)
            };
            buf.set_style(button, style);
            let text = Rect::new(x + 2, y, widths[i].saturating_sub(4), 1).intersection(&area);
            draw_label(buf, text, label, style);
            register(doc, Node::new("button", button));
            self.hits.push(button, PageAction::LaunchTour);
            x = x.saturating_add(widths[i] + 4);
        }
        y += 3;

        line(buf, area, y, "24H TRENDING ZIPS LEADERBOARD", Style::new().fg(palette::TEXT).bold());
        y += 2;
        for (rank, influencer) in INFLUENCERS.iter().take(LEADERBOARD_ROWS).enumerate() {
            if y >= area.bottom().saturating_sub(1) {
                break;
            }
            let text = format!(
                "#{:<2} {:<16} {:<18} {:>6} ZIPS",
                rank + 1,
                influencer.display_name,
                influencer.username,
                thousands(influencer.zips)
            );
            line(buf, area, y, &text, Style::new().fg(palette::TEXT));
            y += 1;
        }

        if area.height > 1 {
            let hint = Rect::new(area.x + 1, area.bottom() - 1, area.width.saturating_sub(1), 1);
            draw_label(buf, hint, "Enter take the tour · q quit", Style::new().fg(palette::MUTED));
        }
    }

    fn handle_event(&mut self, event: &Event) -> Option<PageAction> {
        match event {
            Event::Key(key) if key.is_press() && key.code == KeyCode::Enter => {
                Some(PageAction::LaunchTour)
            }
            Event::Mouse(mouse) if mouse.is_left_click() => self.hits.hit(mouse.x, mouse.y),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip_core::event::{KeyEvent, MouseEvent};

    #[test]
    fn renders_pitch_and_buttons() {
        let mut buf = Buffer::new(100, 30);
        let mut doc = StaticDocument::new(buf.area());
        let mut page = LandingPage::new();
        page.render(buf.area(), &mut buf, &mut doc, RenderContext::default());

        assert!(buf.row_text(5).contains("Zero-fee tips for the social web"));
        assert!(buf.row_text(8).contains("CONTINUE WITH WALLET"));
        assert_eq!(doc.len(), 2);

        let wallet = doc.nodes()[1].bounds;
        let click = Event::Mouse(MouseEvent::click(wallet.x + 1, wallet.y));
        assert_eq!(page.handle_event(&click), Some(PageAction::LaunchTour));
    }

    #[test]
    fn enter_launches_the_tour() {
        let mut page = LandingPage::new();
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(page.handle_event(&enter), Some(PageAction::LaunchTour));
        let other = Event::Key(KeyEvent::new(KeyCode::Char('x')));
        assert_eq!(page.handle_event(&other), None);
    }
}
