#![forbid(unsafe_code)]

//! Core: geometry, input events, and terminal lifecycle for the ZIP tour.

pub mod event;
pub mod geometry;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;
