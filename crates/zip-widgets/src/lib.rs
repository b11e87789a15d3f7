#![forbid(unsafe_code)]

//! Widgets for the ZIP pages and the tour overlay.

pub mod block;
pub mod paragraph;

use unicode_width::UnicodeWidthStr;
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::style::Style;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect` and
/// must not write outside it.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Display width of a string in cells.
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Draw a single-line label clipped to `area`, returning the x after it.
pub fn draw_label(buf: &mut Buffer, area: Rect, text: &str, style: Style) -> u16 {
    if area.is_empty() {
        return area.x;
    }
    buf.set_string(area.x, area.y, text, style, area.right())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_width_counts_cells() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width("界"), 2);
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn draw_label_is_clipped() {
        let mut buf = Buffer::new(8, 2);
        let end = draw_label(&mut buf, Rect::new(2, 1, 3, 1), "Trending", Style::default());
        assert_eq!(end, 5);
        assert_eq!(buf.row_text(1), "  Tre   ");
        assert_eq!(buf.row_text(0), "        ");
    }

    #[test]
    fn draw_label_empty_area_is_noop() {
        let mut buf = Buffer::new(4, 1);
        let end = draw_label(&mut buf, Rect::new(1, 0, 0, 1), "x", Style::default());
        assert_eq!(end, 1);
        assert_eq!(buf.row_text(0), "    ");
    }
}
