#![forbid(unsafe_code)]

//! Pages a tour step can live on.

use std::fmt;

/// An in-app page that hosts tour steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Profile,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Dashboard, Page::Profile];

    /// Route path of the page.
    pub const fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/dashboard",
            Page::Profile => "/profile",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Profile => "profile",
        }
    }

    /// Map a route path to a tour page.
    ///
    /// Matching is by substring so nested routes (`/profile/settings`) and
    /// query strings still resolve. Routes that host no tour steps, such as
    /// the landing page, return `None`.
    pub fn from_path(path: &str) -> Option<Page> {
        if path.contains(Page::Profile.path()) {
            Some(Page::Profile)
        } else if path.contains(Page::Dashboard.path()) {
            Some(Page::Dashboard)
        } else {
            None
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
