#![forbid(unsafe_code)]

//! Render: cell grid, styles, and the ANSI presenter.

pub mod buffer;
pub mod cell;
pub mod presenter;
pub mod style;
