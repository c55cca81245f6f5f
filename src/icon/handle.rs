//! Weak handle on a host-owned icon.
//!
//! The host owns the icon and may destroy it at any time. Controllers only
//! keep a weak reference, so work scheduled against a destroyed icon
//! silently does nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A non-owning handle on an icon.
pub struct IconHandle<I> {
    icon: Weak<RefCell<I>>,
}

impl<I> IconHandle<I> {
    /// Create a handle on a host-owned icon.
    pub fn new(icon: &Rc<RefCell<I>>) -> Self {
        Self {
            icon: Rc::downgrade(icon),
        }
    }

    /// Returns true while the host still owns the icon.
    pub fn is_alive(&self) -> bool {
        self.icon.strong_count() > 0
    }

    /// Run `f` against the icon.
    ///
    /// Returns `None` without calling `f` if the icon has been destroyed or
    /// is currently borrowed elsewhere.
    pub fn with<R>(&self, f: impl FnOnce(&mut I) -> R) -> Option<R> {
        let Some(icon) = self.icon.upgrade() else {
            log::debug!("icon is gone, skipping update");
            return None;
        };
        let mut guard = match icon.try_borrow_mut() {
            Ok(guard) => guard,
            Err(_) => {
                log::warn!("icon is busy, skipping update");
                return None;
            }
        };
        Some(f(&mut guard))
    }
}

impl<I> Clone for IconHandle<I> {
    fn clone(&self) -> Self {
        Self {
            icon: self.icon.clone(),
        }
    }
}
