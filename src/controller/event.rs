//! Host events and click targets.
//!
//! The host delivers one event at a time per widget instance. Clicks come
//! from the user through the controls registered at start.

use crate::icon::{Page, PortKind, Role};

/// Events pushed by the host to one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The widget instance was created.
    Start,

    /// A data value of the instance changed.
    Change {
        /// Identifying key of the datum.
        uri: String,
        /// New value; `None` or empty when the datum was cleared.
        value: Option<String>,
    },
}

impl HostEvent {
    /// A change carrying a value.
    pub fn change(uri: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Change {
            uri: uri.into(),
            value: Some(value.into()),
        }
    }

    /// A change clearing the datum.
    pub fn cleared(uri: impl Into<String>) -> Self {
        Self::Change {
            uri: uri.into(),
            value: None,
        }
    }
}

/// A clickable control inside an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Button toggling the visibility of one port kind.
    VisibilityToggle(PortKind),
    /// Selector of one knob page.
    PageSelector(Page),
}

impl Control {
    /// The icon role of this control.
    pub fn role(&self) -> Role {
        match self {
            Control::VisibilityToggle(kind) => Role::VisibilityToggle(*kind),
            Control::PageSelector(page) => Role::PageSelector(*page),
        }
    }
}
