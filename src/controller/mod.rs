//! Controller module
//!
//! Per-widget state machines reacting to host events and user clicks.
//! Includes the two port visibility variants and the paged knob variant.

pub mod data;
pub mod deferred;
pub mod event;
pub mod pages;
pub mod ports;
pub mod screenshot;

use std::time::Instant;

pub use data::InstanceData;
pub use deferred::{Deferred, DEFAULT_COLLAPSE_DELAY};
pub use event::{Control, HostEvent};
pub use pages::KnobPageController;
pub use ports::{CollapsePolicy, PortVisibilityController};
pub use screenshot::ScreenshotState;

/// The event contract between a host and one widget instance.
///
/// Every call runs to completion before the next one is made. Hosts call
/// [`WidgetController::poll`] regularly so deferred work can run.
pub trait WidgetController {
    /// Key of the datum carrying the patch screenshot.
    fn screenshot_key(&self) -> &str;

    /// Handle a host event, taking `now` as the current time.
    fn handle_event_at(&mut self, event: &HostEvent, now: Instant);

    /// Handle a host event.
    fn handle_event(&mut self, event: &HostEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Handle a click on one of the icon's controls.
    ///
    /// Controls without a registered responder are ignored.
    fn click(&mut self, control: Control);

    /// Run deferred work that is due at `now`.
    fn poll(&mut self, _now: Instant) {}

    /// When deferred work is next due, if any is pending.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Which of comment and screenshot is currently shown.
    fn screenshot_state(&self) -> ScreenshotState;

    /// Controls that have a responder registered.
    fn bindings(&self) -> &[Control];
}
