#![forbid(unsafe_code)]

//! ZIP terminal demo.
//!
//! A landing page, a creator dashboard, and a profile page, drawn into a
//! [`zip_render::buffer::Buffer`] and wired to the guided tour from
//! [`zip_tour`]. [`app::App`] is headless so the whole flow can be driven
//! from tests; [`app::run`] attaches it to a terminal.

pub mod app;
pub mod chrome;
pub mod cli;
pub mod data;
pub mod logging;
pub mod pages;
pub mod route;
