#![forbid(unsafe_code)]

//! Word-wrapped text.
//!
//! # Invariants
//!
//! 1. No wrapped line is wider than the requested width.
//! 2. Runs of whitespace collapse to a single space.
//! 3. Blank source lines survive as empty lines.

use unicode_width::UnicodeWidthChar;
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::style::Style;

use crate::{Widget, text_width};

/// Wrap `text` at word boundaries so no line exceeds `max_width` cells.
///
/// Words wider than `max_width` are broken at character boundaries.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word);

            if word_width > max_width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current_line));
                }
                let (mut pieces, tail, tail_width) = split_long_word(word, max_width);
                lines.append(&mut pieces);
                current_line = tail;
                current_width = tail_width;
            } else if current_width == 0 {
                current_line = word.to_string();
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
                current_width = word_width;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

/// Break a word into full-width pieces plus a trailing remainder.
fn split_long_word(word: &str, max_width: usize) -> (Vec<String>, String, usize) {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0usize;
    for ch in word.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push(ch);
        width += w;
    }
    (pieces, piece, width)
}

/// A block of wrapped text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Number of rows the text needs at the given width.
    pub fn line_count(&self, width: u16) -> u16 {
        wrap_text(self.text, width as usize).len().min(u16::MAX as usize) as u16
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let lines = wrap_text(self.text, area.width as usize);
        for (y, line) in (area.y..area.bottom()).zip(lines.iter()) {
            buf.set_string(area.x, y, line, self.style, area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundary() {
        let lines = wrap_text("abcde fghij klmno", 12);
        assert_eq!(lines, vec!["abcde fghij", "klmno"]);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap_text("abcde fghij", 11), vec!["abcde fghij"]);
    }

    #[test]
    fn keeps_blank_lines_between_paragraphs() {
        let lines = wrap_text("First paragraph\n\nSecond paragraph", 40);
        assert_eq!(lines, vec!["First paragraph", "", "Second paragraph"]);
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(wrap_text("hello    world", 40), vec!["hello world"]);
        assert!(wrap_text("   ", 40).is_empty());
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert!(wrap_text("Hello world", 0).is_empty());
    }

    #[test]
    fn long_word_is_broken() {
        let lines = wrap_text("go supercalifragilistic now", 8);
        assert_eq!(lines, vec!["go", "supercal", "ifragili", "stic now"]);
        assert!(lines.iter().all(|l| text_width(l) <= 8));
    }

    #[test]
    fn paragraph_renders_clipped_to_area() {
        let mut buf = Buffer::new(6, 2);
        Paragraph::new("one two three").render(buf.area(), &mut buf);
        assert_eq!(buf.row_text(0), "one   ");
        assert_eq!(buf.row_text(1), "two   ");
    }

    #[test]
    fn line_count_matches_wrap() {
        let p = Paragraph::new("Navigate between different content categories");
        assert_eq!(p.line_count(20), wrap_text(p.text, 20).len() as u16);
        assert_eq!(p.line_count(0), 0);
    }
}
