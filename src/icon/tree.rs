//! In-memory icon tree.
//!
//! A flat list of role-tagged elements standing in for the markup of a
//! pedal icon. Hosts without a DOM (the demo window, tests) drive
//! controllers against it and render from it.

use std::collections::BTreeSet;

use super::role::{Display, Marker, Page, PortDirection, PortKind, Role};
use super::Icon;

/// One element of the icon.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Structural role used for lookups.
    pub role: Role,
    /// Markers currently carried by the element.
    pub markers: BTreeSet<Marker>,
    /// Text label.
    pub text: String,
    /// Current display rule.
    pub display: Display,
    /// Background image URL, if one was set.
    pub background_image: Option<String>,
}

impl Element {
    /// Creates a visible, unmarked element without text.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            markers: BTreeSet::new(),
            text: String::new(),
            display: Display::Default,
            background_image: None,
        }
    }

    /// Set the text label.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the display rule.
    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Add a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    /// Returns true if the element carries the marker.
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

/// A retained icon made of role-tagged elements.
#[derive(Clone, Debug, Default)]
pub struct IconTree {
    elements: Vec<Element>,
}

impl IconTree {
    /// Create an empty icon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Icon of a pedal with audio/CV port groups and visibility toggles.
    ///
    /// `audio` and `cv` give the number of (input, output) ports. The
    /// comment placeholder is shown and the screenshot area hidden.
    pub fn port_pedal(audio: (usize, usize), cv: (usize, usize)) -> Self {
        let mut tree = Self::new();
        for (kind, (inputs, outputs)) in [(PortKind::Audio, audio), (PortKind::Cv, cv)] {
            for _ in 0..inputs {
                tree.push(Element::new(Role::Ports(kind, PortDirection::Input)));
            }
            for _ in 0..outputs {
                tree.push(Element::new(Role::Ports(kind, PortDirection::Output)));
            }
            tree.push(Element::new(Role::VisibilityToggle(kind)).with_text(kind.show_label()));
        }
        tree.push_screenshot_elements();
        tree
    }

    /// Icon of a pedal with three knob pages and their selectors.
    ///
    /// The markup shows the first page and marks its selector.
    pub fn paged_pedal() -> Self {
        let mut tree = Self::new();
        for page in Page::ALL {
            let first = page == Page::First;
            tree.push(
                Element::new(Role::KnobPage(page))
                    .with_display(if first { Display::Flex } else { Display::None }),
            );
            let mut selector =
                Element::new(Role::PageSelector(page)).with_text(page.number().to_string());
            if first {
                selector = selector.with_marker(Marker::Selected);
            }
            tree.push(selector);
        }
        tree.push_screenshot_elements();
        tree
    }

    fn push_screenshot_elements(&mut self) {
        self.push(Element::new(Role::ScreenshotImage));
        self.push(Element::new(Role::ScreenshotArea).with_display(Display::None));
        self.push(Element::new(Role::CommentArea));
    }

    /// Append an element and return its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate over the elements matching a role.
    pub fn matching(&self, role: Role) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |element| element.role == role)
    }

    fn matching_mut(&mut self, role: Role) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut().filter(move |element| element.role == role)
    }

    /// The `index`-th element matching a role.
    pub fn element(&self, role: Role, index: usize) -> Option<&Element> {
        self.matching(role).nth(index)
    }

    /// Mutable access to the `index`-th element matching a role.
    pub fn element_mut(&mut self, role: Role, index: usize) -> Option<&mut Element> {
        self.matching_mut(role).nth(index)
    }

    /// Text of the first element matching a role.
    pub fn text(&self, role: Role) -> Option<&str> {
        self.matching(role).next().map(|element| element.text.as_str())
    }

    /// Display rule of the first element matching a role.
    pub fn display(&self, role: Role) -> Option<Display> {
        self.matching(role).next().map(|element| element.display)
    }

    /// Background image of the first element matching a role.
    pub fn background_image(&self, role: Role) -> Option<&str> {
        self.matching(role)
            .next()
            .and_then(|element| element.background_image.as_deref())
    }

    /// Returns true if at least one element matches and all of them carry the marker.
    pub fn all_marked(&self, role: Role, marker: Marker) -> bool {
        let mut matched = false;
        for element in self.matching(role) {
            if !element.has_marker(marker) {
                return false;
            }
            matched = true;
        }
        matched
    }

    /// Returns true if any element matching the role carries the marker.
    pub fn any_marked(&self, role: Role, marker: Marker) -> bool {
        self.matching(role).any(|element| element.has_marker(marker))
    }

    /// Plug or unplug a cable on one port.
    ///
    /// Input ports get [`Marker::InputConnected`], output ports
    /// [`Marker::OutputConnected`]. Other roles and missing ports are ignored.
    pub fn set_connected(&mut self, role: Role, index: usize, connected: bool) {
        let marker = match role {
            Role::Ports(_, PortDirection::Input) => Marker::InputConnected,
            Role::Ports(_, PortDirection::Output) => Marker::OutputConnected,
            _ => return,
        };
        if let Some(element) = self.element_mut(role, index) {
            if connected {
                element.markers.insert(marker);
            } else {
                element.markers.remove(&marker);
            }
        }
    }
}

impl Icon for IconTree {
    fn count(&self, role: Role) -> usize {
        self.matching(role).count()
    }

    fn count_marked(&self, marker: Marker) -> usize {
        self.elements
            .iter()
            .filter(|element| element.has_marker(marker))
            .count()
    }

    fn add_marker(&mut self, role: Role, marker: Marker) {
        for element in self.matching_mut(role) {
            element.markers.insert(marker);
        }
    }

    fn remove_marker(&mut self, role: Role, marker: Marker) {
        for element in self.matching_mut(role) {
            element.markers.remove(&marker);
        }
    }

    fn set_text(&mut self, role: Role, text: &str) {
        for element in self.matching_mut(role) {
            element.text = text.to_string();
        }
    }

    fn set_background_image(&mut self, role: Role, url: &str) {
        for element in self.matching_mut(role) {
            element.background_image = Some(url.to_string());
        }
    }

    fn set_display(&mut self, role: Role, display: Display) {
        for element in self.matching_mut(role) {
            element.display = display;
        }
    }
}
