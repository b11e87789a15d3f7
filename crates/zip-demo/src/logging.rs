#![forbid(unsafe_code)]

//! Log setup.
//!
//! The demo owns the terminal (raw mode, alternate screen), so logs go to a
//! file or nowhere.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const FILTER_ENV: &str = "ZIP_LOG";
pub const DEFAULT_FILTER: &str = "info";

/// Filter from `ZIP_LOG`, falling back to [`DEFAULT_FILTER`] when unset or
/// unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a `fmt` subscriber appending to `path`.
///
/// Returns `Ok(false)` without installing anything when `path` is `None`.
pub fn init(path: Option<&Path>) -> io::Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(true)
}
