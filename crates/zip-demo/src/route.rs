#![forbid(unsafe_code)]

//! In-app routes.

use std::fmt;

use zip_tour::page::Page;

/// Where the user is. The landing page hosts no tour steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Tour(Page),
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Tour(page) => page.path(),
        }
    }

    pub fn from_path(path: &str) -> Self {
        Page::from_path(path).map_or(Route::Landing, Route::Tour)
    }

    /// Parse the `--page` option value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "landing" | "home" | "/" => Some(Route::Landing),
            "dashboard" => Some(Route::Tour(Page::Dashboard)),
            "profile" => Some(Route::Tour(Page::Profile)),
            _ => None,
        }
    }

    pub fn page(self) -> Option<Page> {
        match self {
            Route::Landing => None,
            Route::Tour(page) => Some(page),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
