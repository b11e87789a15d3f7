#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter compares each frame with the previously presented one and
//! only rewrites cells that changed. Style changes are emitted only when the
//! next written cell differs from the terminal's current style, and the
//! whole frame is flushed with a single write.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl From<&Cell> for CellStyle {
    fn from(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// Writes buffers to a terminal-like sink.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    previous: Option<Buffer>,
    current_style: Option<CellStyle>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter over the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_style: None,
        }
    }

    /// Forget the previous frame so the next present redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.current_style = None;
    }

    /// Present a frame. Returns the number of cells written.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<usize> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("present", w = buffer.width(), h = buffer.height()).entered();

        let full = match &self.previous {
            Some(prev) => prev.width() != buffer.width() || prev.height() != buffer.height(),
            None => true,
        };
        if full {
            crossterm::queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            self.current_style = None;
        }

        let mut written = 0;
        let mut cursor: Option<(u16, u16)> = None;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let unchanged = !full
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|old| old == cell);
                if unchanged {
                    continue;
                }
                if cursor != Some((x, y)) {
                    crossterm::queue!(self.writer, MoveTo(x, y))?;
                }
                self.write_cell(cell)?;
                cursor = Some((x.saturating_add(1), y));
                written += 1;
            }
        }

        self.writer.flush()?;
        self.previous = Some(buffer.clone());
        Ok(written)
    }

    fn write_cell(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from(cell);
        if self.current_style != Some(style) {
            crossterm::queue!(
                self.writer,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(to_color(style.fg)),
                SetBackgroundColor(to_color(style.bg)),
            )?;
            for (flag, attr) in [
                (StyleFlags::BOLD, Attribute::Bold),
                (StyleFlags::DIM, Attribute::Dim),
                (StyleFlags::ITALIC, Attribute::Italic),
                (StyleFlags::UNDERLINE, Attribute::Underlined),
                (StyleFlags::REVERSE, Attribute::Reverse),
            ] {
                if style.attrs.contains(flag) {
                    crossterm::queue!(self.writer, SetAttribute(attr))?;
                }
            }
            self.current_style = Some(style);
        }
        crossterm::queue!(self.writer, Print(cell.ch))
    }

    /// Consume the presenter and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

fn to_color(color: PackedRgba) -> Color {
    if color.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}
