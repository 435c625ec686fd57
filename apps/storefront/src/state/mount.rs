//! Per-page liveness markers.
//!
//! A page owns a [`Mount`]; its effects carry a [`MountWatch`]. Dropping the
//! page drops the `Mount`, after which every watch reports the page as gone
//! and late fetch results are thrown away instead of dispatched.

use std::sync::{Arc, Weak};

#[derive(Debug)]
struct MountInner {
    page: &'static str,
}

/// Held by a mounted page for as long as it is on screen.
#[derive(Debug)]
pub struct Mount {
    inner: Arc<MountInner>,
}

impl Mount {
    pub fn new(page: &'static str) -> Self {
        Mount {
            inner: Arc::new(MountInner { page }),
        }
    }

    /// Returns a weak handle for an effect started by this page.
    pub fn watch(&self) -> MountWatch {
        MountWatch {
            inner: Arc::downgrade(&self.inner),
            page: self.inner.page,
        }
    }
}

/// Weak handle to a [`Mount`].
#[derive(Debug, Clone)]
pub struct MountWatch {
    inner: Weak<MountInner>,
    page: &'static str,
}

impl MountWatch {
    /// True while the owning page is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn page(&self) -> &'static str {
        self.page
    }
}
