#![forbid(unsafe_code)]

//! Owner of the tour store for the whole app.
//!
//! Pages and widgets reach the store through a [`TutorialProvider`] that
//! the host installs once at startup. Reaching for the store before that is
//! a wiring bug, so [`TutorialProvider::tutorial`] panics;
//! [`TutorialProvider::try_tutorial`] reports it instead.

use crate::catalog::validate;
use crate::error::TourError;
use crate::store::TutorialStore;

#[derive(Debug, Default)]
pub struct TutorialProvider {
    store: Option<TutorialStore>,
}

impl TutorialProvider {
    /// An empty provider. Call [`install`](Self::install) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the store's steps and take ownership of it.
    pub fn install(&mut self, store: TutorialStore) -> Result<(), TourError> {
        validate(store.steps())?;
        self.store = Some(store);
        Ok(())
    }

    /// Build an installed provider in one go.
    pub fn with_store(store: TutorialStore) -> Result<Self, TourError> {
        let mut provider = Self::new();
        provider.install(store)?;
        Ok(provider)
    }

    pub fn is_installed(&self) -> bool {
        self.store.is_some()
    }

    /// The installed store.
    ///
    /// # Panics
    ///
    /// Panics if no store has been installed.
    pub fn tutorial(&mut self) -> &mut TutorialStore {
        match self.store.as_mut() {
            Some(store) => store,
            None => panic!("tutorial() must be used within an initialized TutorialProvider"),
        }
    }

    pub fn try_tutorial(&mut self) -> Result<&mut TutorialStore, TourError> {
        self.store.as_mut().ok_or(TourError::MissingProvider)
    }

    pub fn try_tutorial_ref(&self) -> Result<&TutorialStore, TourError> {
        self.store.as_ref().ok_or(TourError::MissingProvider)
    }
}
