#![forbid(unsafe_code)]

//! Tour step definitions.

use std::fmt;

use crate::page::Page;

/// What a step points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The whole page body. Used by centered, non-anchored steps.
    WholePage,
    /// A selector resolved against the page document.
    Selector(&'static str),
}

/// Requested tooltip placement relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Placement {
    pub const fn is_center(self) -> bool {
        matches!(self, Placement::Center)
    }
}

/// Side effect run when the user advances past a step.
#[derive(Clone, Copy, Default)]
pub enum StepAction {
    #[default]
    None,
    Effect(fn()),
}

impl StepAction {
    pub fn run(&self) {
        if let StepAction::Effect(effect) = self {
            effect();
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, StepAction::None)
    }
}

impl fmt::Debug for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::None => f.write_str("None"),
            StepAction::Effect(_) => f.write_str("Effect(..)"),
        }
    }
}

/// One unit of the tour: a target, text, placement, and page.
#[derive(Debug, Clone, Copy)]
pub struct TutorialStep {
    pub id: &'static str,
    pub target: Target,
    /// Selectors tried in order when `target` does not resolve.
    pub fallbacks: &'static [&'static str],
    pub title: &'static str,
    pub content: &'static str,
    pub position: Placement,
    pub page: Page,
    pub action: StepAction,
    pub show_skip: bool,
    pub show_previous: bool,
    /// Leaving this step hands the user over to the next page.
    pub page_transition: bool,
}

impl TutorialStep {
    pub const fn new(
        id: &'static str,
        target: Target,
        title: &'static str,
        content: &'static str,
        position: Placement,
        page: Page,
    ) -> Self {
        Self {
            id,
            target,
            fallbacks: &[],
            title,
            content,
            position,
            page,
            action: StepAction::None,
            show_skip: true,
            show_previous: true,
            page_transition: false,
        }
    }

    #[must_use]
    pub const fn fallbacks(mut self, fallbacks: &'static [&'static str]) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    #[must_use]
    pub const fn action(mut self, effect: fn()) -> Self {
        self.action = StepAction::Effect(effect);
        self
    }

    #[must_use]
    pub const fn hide_skip(mut self) -> Self {
        self.show_skip = false;
        self
    }

    #[must_use]
    pub const fn hide_previous(mut self) -> Self {
        self.show_previous = false;
        self
    }

    #[must_use]
    pub const fn page_transition(mut self) -> Self {
        self.page_transition = true;
        self
    }
}
