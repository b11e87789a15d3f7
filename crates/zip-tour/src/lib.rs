#![forbid(unsafe_code)]

//! Guided product tour for the ZIP dashboard and profile pages.
//!
//! The tour walks a first-time visitor through a fixed [`catalog`] of
//! steps. Each step points at an element on a page, and the [`overlay`]
//! dims everything else and explains it in a tooltip.
//!
//! - [`store::TutorialStore`] owns the tour state and the persisted
//!   "seen" flag.
//! - [`locator::TargetLocator`] finds the element a step points at.
//! - [`positioner::place`] lays the tooltip out next to it.
//! - [`trigger`] starts the tour automatically or from the landing page.
//!
//! # Example
//!
//! ```
//! use zip_tour::storage::MemoryStorage;
//! use zip_tour::store::{TourEvent, TutorialStore};
//!
//! let mut store = TutorialStore::new(Box::new(MemoryStorage::new()));
//! store.start();
//! assert_eq!(store.current_step().map(|s| s.id), Some("welcome"));
//! assert_eq!(store.skip(), Some(TourEvent::Skipped));
//! assert!(store.has_seen_tutorial());
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod locator;
pub mod navigation;
pub mod overlay;
pub mod page;
pub mod positioner;
pub mod selector;
pub mod step;
pub mod storage;
pub mod store;
pub mod timer;
pub mod trigger;

pub use catalog::tutorial_steps;
pub use context::TutorialProvider;
pub use error::TourError;
pub use overlay::OverlayController;
pub use page::Page;
pub use step::{Placement, Target, TutorialStep};
pub use store::{TourEvent, TutorialState, TutorialStore};
pub use trigger::{LandingLaunch, TutorialTrigger, can_start_tutorial};
