#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing one frame of the
//! terminal display. Pages draw into it first; the tour overlay then dims
//! and decorates the same grid before the presenter writes it out.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Writes outside the grid are ignored, never panic

use unicode_width::UnicodeWidthChar;
use zip_core::geometry::Rect;

use crate::cell::Cell;
use crate::style::Style;

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use zip_render::buffer::Buffer;
/// use zip_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('Z'));
/// assert_eq!(buffer.get(0, 0).map(|c| c.ch), Some('Z'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a new buffer filled with blank cells.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0, "buffer width must be > 0");
        assert!(height > 0, "buffer height must be > 0");

        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get a cell, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable cell, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Replace a cell. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill a rectangle (clipped to the buffer) with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.intersection(&self.area());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Apply a style to every cell in a rectangle, preserving content.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        if style.is_empty() {
            return;
        }
        let clipped = rect.intersection(&self.area());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    style.apply(cell);
                }
            }
        }
    }

    /// Draw a string starting at `(x, y)`, stopping before `max_x`.
    ///
    /// Zero-width characters are skipped; a wide character that would
    /// straddle `max_x` is not drawn. Returns the x position after the
    /// last drawn character.
    pub fn set_string(&mut self, mut x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > max_x {
                break;
            }
            let mut cell = self.get(x, y).copied().unwrap_or_default();
            cell.ch = ch;
            style.apply(&mut cell);
            self.set(x, y, cell);
            for pad in 1..w {
                if let Some(next) = self.get_mut(x + pad, y) {
                    next.ch = ' ';
                }
            }
            x += w;
        }
        x
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Row content as a string (for assertions and snapshots).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
