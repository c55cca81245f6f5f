//! Roles, markers and display rules of icon sub-elements.
//!
//! A role names a set of zero or more elements inside one icon. Controllers
//! never address single elements, only roles, so every operation applies to
//! a whole group at once.

/// The kind of signal a port group carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Audio-rate ports.
    Audio,
    /// Control voltage ports.
    Cv,
}

impl PortKind {
    /// Both kinds, audio first.
    pub const ALL: [PortKind; 2] = [PortKind::Audio, PortKind::Cv];

    /// Returns the short name used in toggle labels.
    pub fn name(&self) -> &'static str {
        match self {
            PortKind::Audio => "Audio",
            PortKind::Cv => "CV",
        }
    }

    /// Label shown on the toggle while the ports are collapsed.
    pub fn show_label(&self) -> &'static str {
        match self {
            PortKind::Audio => "Show Audio",
            PortKind::Cv => "Show CV",
        }
    }

    /// Label shown on the toggle while the ports are expanded.
    pub fn hide_label(&self) -> &'static str {
        match self {
            PortKind::Audio => "Hide Audio",
            PortKind::Cv => "Hide CV",
        }
    }
}

/// Direction of a port group on the icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Ports on the input side of the pedal.
    Input,
    /// Ports on the output side of the pedal.
    Output,
}

impl PortDirection {
    /// Returns a human-readable name for the port direction.
    pub fn name(&self) -> &'static str {
        match self {
            PortDirection::Input => "Input",
            PortDirection::Output => "Output",
        }
    }
}

/// One of the three knob pages of the paged variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    First,
    Second,
    Third,
}

impl Page {
    /// All pages in display order.
    pub const ALL: [Page; 3] = [Page::First, Page::Second, Page::Third];

    /// 1-based page number as shown on the selector.
    pub fn number(&self) -> u8 {
        match self {
            Page::First => 1,
            Page::Second => 2,
            Page::Third => 3,
        }
    }
}

/// A structural role inside an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// A group of ports of one kind on one side of the pedal.
    Ports(PortKind, PortDirection),
    /// The button that toggles the visibility of one port kind.
    VisibilityToggle(PortKind),
    /// A group of knobs shown on one page.
    KnobPage(Page),
    /// The selector control for one knob page.
    PageSelector(Page),
    /// The element carrying the screenshot as its background image.
    ScreenshotImage,
    /// The container shown while a screenshot is available.
    ScreenshotArea,
    /// The placeholder shown while no screenshot is available.
    CommentArea,
}

impl Role {
    /// All four port groups.
    pub const PORT_GROUPS: [Role; 4] = [
        Role::Ports(PortKind::Audio, PortDirection::Input),
        Role::Ports(PortKind::Audio, PortDirection::Output),
        Role::Ports(PortKind::Cv, PortDirection::Input),
        Role::Ports(PortKind::Cv, PortDirection::Output),
    ];

    /// Input and output port groups of one kind.
    pub fn port_groups(kind: PortKind) -> [Role; 2] {
        [
            Role::Ports(kind, PortDirection::Input),
            Role::Ports(kind, PortDirection::Output),
        ]
    }
}

/// A named visual marker an element may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    /// The port group is expanded.
    Expanded,
    /// The page selector is the active one.
    Selected,
    /// The input port has a cable plugged in.
    InputConnected,
    /// The output port has a cable plugged in.
    OutputConnected,
}

impl Marker {
    /// Both connection markers.
    pub const CONNECTIONS: [Marker; 2] = [Marker::InputConnected, Marker::OutputConnected];
}

/// Display rule applied to an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// Shown with the element's default rule.
    #[default]
    Default,
    /// Shown as a flex container.
    Flex,
    /// Hidden.
    None,
}

impl Display {
    /// Returns true unless the element is hidden.
    pub fn is_shown(&self) -> bool {
        !matches!(self, Display::None)
    }
}
