#![forbid(unsafe_code)]

use std::fmt;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors surfaced by the tour's setup paths.
#[derive(Debug)]
pub enum TourError {
    /// The tour was used before a provider was installed.
    MissingProvider,
    /// The step list breaks an ordering rule.
    Catalog(CatalogError),
    Storage(StorageError),
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourError::MissingProvider => {
                write!(f, "tutorial used outside an initialized TutorialProvider")
            }
            TourError::Catalog(e) => write!(f, "invalid tour: {e}"),
            TourError::Storage(e) => write!(f, "tour storage: {e}"),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TourError::MissingProvider => None,
            TourError::Catalog(e) => Some(e),
            TourError::Storage(e) => Some(e),
        }
    }
}

impl From<CatalogError> for TourError {
    fn from(e: CatalogError) -> Self {
        TourError::Catalog(e)
    }
}

impl From<StorageError> for TourError {
    fn from(e: StorageError) -> Self {
        TourError::Storage(e)
    }
}
