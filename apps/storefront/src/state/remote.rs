//! Lifecycle of data fetched from the API.

use crate::error::AppError;

/// A slice backed by a fetch.
///
/// ```text
///   Idle ──load──► Loading ──ok──► Loaded(T)
///                     │
///                     └──err──► Failed(AppError)
/// ```
///
/// A load discarded after its page unmounted leaves the slice in `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(AppError),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Idle
    }
}

impl<T> Remote<T> {
    /// Returns the loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Remote::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Remote::Loaded(_))
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            Remote::Failed(err) => Some(err),
            _ => None,
        }
    }
}
