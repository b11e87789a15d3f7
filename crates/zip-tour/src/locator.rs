#![forbid(unsafe_code)]

//! Resolving step targets to on-screen anchors.
//!
//! [`resolve`] is a pure function over a [`Document`]. [`TargetLocator`]
//! wraps it with the immediate attempt plus one delayed retry for content
//! that shows up a little late.

use std::time::Duration;

use zip_core::geometry::Rect;

use crate::selector::Selector;
use crate::step::{Target, TutorialStep};
use crate::timer::Delay;

/// Delay before the second lookup attempt.
pub const RETRY_DELAY: Duration = Duration::from_millis(300);

/// Something the locator can query for element bounds.
pub trait Document {
    /// Bounds of the first element matching `selector`.
    fn query(&self, selector: &Selector) -> Option<Rect>;

    /// The visible page area. Also the bounds of the page body.
    fn viewport(&self) -> Rect;
}

/// An element registered by a page during layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub bounds: Rect,
}

impl Node {
    pub fn new(tag: impl Into<String>, bounds: Rect) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            bounds,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Shorthand for the `data-tutorial` marker attribute.
    #[must_use]
    pub fn tutorial(self, marker: &str) -> Self {
        self.attr("data-tutorial", marker)
    }
}

/// An in-memory document, rebuilt by the pages on every frame.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    viewport: Rect,
    nodes: Vec<Node>,
}

impl StaticDocument {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
        }
    }

    /// Drop all nodes and set a new viewport.
    pub fn reset(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Document for StaticDocument {
    fn query(&self, selector: &Selector) -> Option<Rect> {
        self.nodes
            .iter()
            .find(|node| selector.matches(&node.tag, &node.attrs))
            .map(|node| node.bounds)
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}

/// Which lookup produced an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    /// The whole-page sentinel.
    Body,
    /// The step's own selector.
    Primary,
    /// The fallback at this index.
    Fallback(usize),
}

impl AnchorSource {
    /// Higher is better: primary or body, then earlier fallbacks.
    fn preference(self) -> usize {
        match self {
            AnchorSource::Body | AnchorSource::Primary => usize::MAX,
            AnchorSource::Fallback(index) => usize::MAX - 1 - index.min(usize::MAX - 2),
        }
    }
}

/// A located element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub bounds: Rect,
    pub source: AnchorSource,
    selector: Option<Selector>,
}

impl Anchor {
    /// The selector that matched; `None` for the page body.
    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Re-read the bounds after a resize or scroll.
    ///
    /// Returns `false` when the element is gone.
    pub fn refresh(&mut self, document: &dyn Document) -> bool {
        let bounds = match &self.selector {
            None => Some(document.viewport()),
            Some(selector) => document.query(selector),
        };
        match bounds {
            Some(bounds) => {
                self.bounds = bounds;
                true
            }
            None => false,
        }
    }
}

fn query_str(document: &dyn Document, source: &str) -> Option<(Selector, Rect)> {
    let selector = match Selector::parse(source) {
        Ok(selector) => selector,
        Err(error) => {
            tracing::warn!(selector = source, %error, "invalid tour selector");
            return None;
        }
    };
    let bounds = document.query(&selector)?;
    Some((selector, bounds))
}

/// Resolve a target against a document, trying fallbacks in order.
pub fn resolve(document: &dyn Document, target: Target, fallbacks: &[&str]) -> Option<Anchor> {
    let primary = match target {
        Target::WholePage => {
            return Some(Anchor {
                bounds: document.viewport(),
                source: AnchorSource::Body,
                selector: None,
            });
        }
        Target::Selector(source) => source,
    };

    if let Some((selector, bounds)) = query_str(document, primary) {
        return Some(Anchor {
            bounds,
            source: AnchorSource::Primary,
            selector: Some(selector),
        });
    }

    fallbacks.iter().enumerate().find_map(|(index, source)| {
        query_str(document, source).map(|(selector, bounds)| Anchor {
            bounds,
            source: AnchorSource::Fallback(index),
            selector: Some(selector),
        })
    })
}

/// Locates the anchor for the displayed step.
#[derive(Debug, Clone)]
pub struct TargetLocator {
    step_id: Option<&'static str>,
    target: Target,
    fallbacks: &'static [&'static str],
    anchor: Option<Anchor>,
    retry: Delay,
}

impl Default for TargetLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetLocator {
    pub fn new() -> Self {
        Self {
            step_id: None,
            target: Target::WholePage,
            fallbacks: &[],
            anchor: None,
            retry: Delay::new(RETRY_DELAY),
        }
    }

    /// Look up `step`'s target now and schedule the retry.
    pub fn locate(&mut self, step: &TutorialStep, document: &dyn Document) -> Option<&Anchor> {
        self.step_id = Some(step.id);
        self.target = step.target;
        self.fallbacks = step.fallbacks;
        self.anchor = resolve(document, step.target, step.fallbacks);
        self.retry.arm();
        tracing::debug!(
            step = step.id,
            found = self.anchor.is_some(),
            "located tour target"
        );
        self.anchor.as_ref()
    }

    /// Advance the retry delay. When it fires, look again and keep the new
    /// result if it is at least as good. Returns `true` if the anchor
    /// changed.
    pub fn tick(&mut self, elapsed: Duration, document: &dyn Document) -> bool {
        if !self.retry.tick(elapsed) {
            return false;
        }
        let candidate = resolve(document, self.target, self.fallbacks);
        tracing::trace!(
            step = self.step_id,
            found = candidate.is_some(),
            "retried tour target"
        );
        let Some(candidate) = candidate else {
            return false;
        };
        let keep_current = self
            .anchor
            .as_ref()
            .is_some_and(|current| current.source.preference() > candidate.source.preference());
        if keep_current || self.anchor.as_ref() == Some(&candidate) {
            return false;
        }
        self.anchor = Some(candidate);
        true
    }

    /// Re-read the anchor's bounds. Returns `true` if they changed or the
    /// element disappeared.
    pub fn refresh(&mut self, document: &dyn Document) -> bool {
        let Some(anchor) = self.anchor.as_mut() else {
            return false;
        };
        let before = anchor.bounds;
        if !anchor.refresh(document) {
            tracing::debug!(step = self.step_id, "tour target disappeared");
            self.anchor = None;
            return true;
        }
        anchor.bounds != before
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn step_id(&self) -> Option<&'static str> {
        self.step_id
    }

    pub fn is_retry_pending(&self) -> bool {
        self.retry.is_pending()
    }

    /// Forget the step and cancel the retry.
    pub fn reset(&mut self) {
        self.step_id = None;
        self.anchor = None;
        self.retry.cancel();
    }
}
