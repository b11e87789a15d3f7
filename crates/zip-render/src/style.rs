#![forbid(unsafe_code)]

//! Cell styles and the shared ZIP palette.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// A partial cell style: unset fields leave the target cell untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, fg: PackedRgba) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, bg: PackedRgba) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add bold.
    #[must_use]
    pub const fn bold(self) -> Self {
        self.flags(StyleFlags::BOLD)
    }

    /// Add style flags.
    #[must_use]
    pub const fn flags(mut self, flags: StyleFlags) -> Self {
        self.attrs = match self.attrs {
            Some(existing) => Some(existing.union(flags)),
            None => Some(flags),
        };
        self
    }

    /// Whether the style sets nothing.
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Apply the set fields of this style to a cell.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
    }
}

/// Brand colors shared by the pages and the tour overlay.
pub mod palette {
    use crate::cell::PackedRgba;

    /// Primary brand green.
    pub const ZIP_GREEN: PackedRgba = PackedRgba::rgb(0x5f, 0xb5, 0x74);
    /// Darker green for borders and hover states.
    pub const ZIP_GREEN_DARK: PackedRgba = PackedRgba::rgb(0x4a, 0x9b, 0x5f);
    /// Near-black surface for cards and the tooltip.
    pub const SURFACE: PackedRgba = PackedRgba::rgb(0x0f, 0x0f, 0x0f);
    /// Page background.
    pub const BACKGROUND: PackedRgba = PackedRgba::rgb(0x00, 0x00, 0x00);
    /// Primary text.
    pub const TEXT: PackedRgba = PackedRgba::rgb(0xe7, 0xe9, 0xea);
    /// Secondary text.
    pub const MUTED: PackedRgba = PackedRgba::rgb(0x71, 0x76, 0x7b);
}
