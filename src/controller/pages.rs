//! Paged knob group controller.
//!
//! Three selector controls switch between three mutually exclusive knob
//! pages. The page shown before the first click is up to the markup.

use std::time::Instant;

use super::event::{Control, HostEvent};
use super::screenshot::{self, ScreenshotState};
use super::WidgetController;
use crate::icon::{Display, Icon, IconHandle, Marker, Page, Role};

/// Controller of a pedal icon with paged knob groups.
pub struct KnobPageController<I> {
    icon: IconHandle<I>,
    screenshot_key: String,
    started: bool,
    bindings: Vec<Control>,
    selected: Option<Page>,
    screenshot: ScreenshotState,
}

impl<I: Icon> KnobPageController<I> {
    /// Create a controller for the icon behind `icon`.
    pub fn new(icon: IconHandle<I>, screenshot_key: impl Into<String>) -> Self {
        Self {
            icon,
            screenshot_key: screenshot_key.into(),
            started: false,
            bindings: Vec::new(),
            selected: None,
            screenshot: ScreenshotState::default(),
        }
    }

    /// The page selected by the last click, if any.
    pub fn selected(&self) -> Option<Page> {
        self.selected
    }

    fn start(&mut self) {
        if self.started {
            log::warn!("widget already started, ignoring repeated start");
            return;
        }
        self.started = true;
        self.bindings = Page::ALL.map(Control::PageSelector).to_vec();
        log::debug!("knob page widget started");
    }

    fn select(&mut self, page: Page) {
        self.icon.with(|icon| show_page(icon, page));
        self.selected = Some(page);
    }
}

impl<I: Icon> WidgetController for KnobPageController<I> {
    fn screenshot_key(&self) -> &str {
        &self.screenshot_key
    }

    fn handle_event_at(&mut self, event: &HostEvent, _now: Instant) {
        match event {
            HostEvent::Start => self.start(),
            HostEvent::Change { uri, value } => {
                if *uri != self.screenshot_key {
                    return;
                }
                if let Some(state) = self.icon.with(|icon| screenshot::apply(icon, value.as_deref())) {
                    self.screenshot = state;
                }
            }
        }
    }

    fn click(&mut self, control: Control) {
        if !self.bindings.contains(&control) {
            log::debug!("no responder for {control:?}");
            return;
        }
        if let Control::PageSelector(page) = control {
            self.select(page);
        }
    }

    fn screenshot_state(&self) -> ScreenshotState {
        self.screenshot
    }

    fn bindings(&self) -> &[Control] {
        &self.bindings
    }
}

fn show_page<I: Icon>(icon: &mut I, page: Page) {
    for other in Page::ALL.into_iter().filter(|other| *other != page) {
        icon.set_display(Role::KnobPage(other), Display::None);
    }
    icon.set_display(Role::KnobPage(page), Display::Flex);
    for selector in Page::ALL {
        icon.remove_marker(Role::PageSelector(selector), Marker::Selected);
    }
    icon.add_marker(Role::PageSelector(page), Marker::Selected);
}
