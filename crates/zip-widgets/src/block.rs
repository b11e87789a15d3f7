#![forbid(unsafe_code)]

use bitflags::bitflags;
use zip_core::geometry::Rect;
use zip_render::buffer::Buffer;
use zip_render::cell::Cell;
use zip_render::style::Style;

use crate::{Widget, text_width};

bitflags! {
    /// Which edges of a block get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Border glyph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Square,
    Rounded,
    Thick,
}

#[derive(Debug, Clone, Copy)]
struct BorderSet {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderType {
    const fn glyphs(self) -> BorderSet {
        match self {
            BorderType::Square => BorderSet {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            BorderType::Rounded => BorderSet {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BorderType::Thick => BorderSet {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
            },
        }
    }
}

/// A widget that draws a block with optional borders, title, and fill.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    style: Style,
}

impl<'a> Block<'a> {
    /// Create a new block with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block with all borders enabled.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    /// Set which borders to render.
    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Set the style applied to border characters.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the border glyph family.
    #[must_use]
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Set the title drawn on the top border.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the style for the whole block area (typically a background).
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Compute the inner area inside the block's borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    fn border_cell(&self, buf: &Buffer, x: u16, y: u16, c: char) -> Cell {
        let mut cell = buf.get(x, y).copied().unwrap_or_default();
        cell.ch = c;
        self.border_style.apply(&mut cell);
        cell
    }

    fn render_borders(&self, area: Rect, buf: &mut Buffer) {
        let set = self.border_type.glyphs();
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                let cell = self.border_cell(buf, area.x, y, set.vertical);
                buf.set(area.x, y, cell);
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.y..area.bottom() {
                let cell = self.border_cell(buf, right, y, set.vertical);
                buf.set(right, y, cell);
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                let cell = self.border_cell(buf, x, area.y, set.horizontal);
                buf.set(x, area.y, cell);
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.x..area.right() {
                let cell = self.border_cell(buf, x, bottom, set.horizontal);
                buf.set(x, bottom, cell);
            }
        }

        // Corners overwrite the edge glyphs.
        let corners = [
            (Borders::LEFT | Borders::TOP, area.x, area.y, set.top_left),
            (Borders::RIGHT | Borders::TOP, right, area.y, set.top_right),
            (Borders::LEFT | Borders::BOTTOM, area.x, bottom, set.bottom_left),
            (Borders::RIGHT | Borders::BOTTOM, right, bottom, set.bottom_right),
        ];
        for (needed, x, y, glyph) in corners {
            if self.borders.contains(needed) {
                let cell = self.border_cell(buf, x, y, glyph);
                buf.set(x, y, cell);
            }
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else {
            return;
        };
        if !self.borders.contains(Borders::TOP) || area.width < 5 {
            return;
        }
        let max_x = area.right().saturating_sub(2);
        let x = area.x.saturating_add(2);
        if text_width(title) == 0 {
            return;
        }
        buf.set_string(x, area.y, title, self.border_style, max_x);
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }

        if !self.style.is_empty() {
            let mut fill = Cell::default();
            self.style.apply(&mut fill);
            buf.fill(area, fill);
        }
        self.render_borders(area, buf);
        self.render_title(area, buf);
    }
}
