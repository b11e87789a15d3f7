#![forbid(unsafe_code)]

//! Page switching seam between the tour and its host.

use std::fmt;

use crate::page::Page;

/// A client-side navigation that did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The host refused the route change.
    Rejected { to: Page, reason: String },
    /// No router is mounted yet.
    Unavailable,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::Rejected { to, reason } => {
                write!(f, "navigation to {} rejected: {reason}", to.path())
            }
            NavigationError::Unavailable => write!(f, "navigation unavailable"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// How the host switches pages.
pub trait Navigator {
    /// Client-side route change. May fail.
    fn push(&mut self, page: Page) -> Result<(), NavigationError>;

    /// Hard redirect. Always lands on `page`.
    fn redirect(&mut self, page: Page);
}

/// Which path [`navigate_or_redirect`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Pushed,
    Redirected,
}

/// Try a client-side push and fall back to a hard redirect.
///
/// The failure is logged, never returned.
pub fn navigate_or_redirect(navigator: &mut dyn Navigator, page: Page) -> NavigationOutcome {
    match navigator.push(page) {
        Ok(()) => NavigationOutcome::Pushed,
        Err(error) => {
            tracing::warn!(to = page.path(), %error, "navigation failed, redirecting");
            navigator.redirect(page);
            NavigationOutcome::Redirected
        }
    }
}
