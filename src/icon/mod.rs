//! Icon module
//!
//! The capability surface controllers use to read and mutate an icon,
//! an in-memory element tree implementing it, and the weak handle
//! controllers hold on to.

pub mod handle;
pub mod role;
pub mod tree;

pub use handle::IconHandle;
pub use role::{Display, Marker, Page, PortDirection, PortKind, Role};
pub use tree::{Element, IconTree};

/// Structural access to the visual sub-tree of one widget.
///
/// Every mutation applies to all elements matching a role. A role that
/// matches nothing is not an error: the call has no effect.
pub trait Icon {
    /// Number of elements matching a role.
    fn count(&self, role: Role) -> usize;

    /// Number of elements anywhere in the icon carrying a marker.
    fn count_marked(&self, marker: Marker) -> usize;

    /// Adds a marker to every element matching a role.
    fn add_marker(&mut self, role: Role, marker: Marker);

    /// Removes a marker from every element matching a role.
    fn remove_marker(&mut self, role: Role, marker: Marker);

    /// Replaces the text label of every element matching a role.
    fn set_text(&mut self, role: Role, text: &str);

    /// Sets the background image of every element matching a role.
    fn set_background_image(&mut self, role: Role, url: &str);

    /// Applies a display rule to every element matching a role.
    fn set_display(&mut self, role: Role, display: Display);

    /// Shows the elements with their default display rule.
    fn show(&mut self, role: Role) {
        self.set_display(role, Display::Default);
    }

    /// Hides the elements.
    fn hide(&mut self, role: Role) {
        self.set_display(role, Display::None);
    }

    /// Returns true if any element carries a connection marker.
    fn has_connections(&self) -> bool {
        Marker::CONNECTIONS
            .iter()
            .any(|marker| self.count_marked(*marker) > 0)
    }
}
