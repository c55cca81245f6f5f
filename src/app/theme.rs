//! Theme definitions for the demo host
//!
//! Provides color constants and styling for a dark pedalboard look.

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

use crate::icon::PortKind;

/// Background colors
pub mod background {
    use super::Color32;

    /// Main window background - deep dark blue
    pub const MAIN: Color32 = Color32::from_rgb(26, 26, 46);

    /// Panel background - slightly lighter than main
    pub const PANEL: Color32 = Color32::from_rgb(35, 35, 55);

    /// Pedal body
    pub const PEDAL: Color32 = Color32::from_rgb(45, 45, 70);

    /// Widget background when hovered
    pub const WIDGET_HOVERED: Color32 = Color32::from_rgb(55, 55, 85);

    /// Widget background when active/pressed
    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(65, 65, 100);
}

/// Port colors by signal kind
pub mod signal {
    use super::Color32;

    /// Audio ports - blue
    pub const AUDIO: Color32 = Color32::from_rgb(66, 165, 245);

    /// CV ports - orange
    pub const CV: Color32 = Color32::from_rgb(255, 183, 77);
}

/// Text colors
pub mod text {
    use super::Color32;

    /// Primary text - bright white
    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    /// Secondary text - dimmed
    pub const SECONDARY: Color32 = Color32::from_rgb(160, 160, 175);

    /// Disabled text
    pub const DISABLED: Color32 = Color32::from_rgb(100, 100, 115);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    /// Primary accent - blue
    pub const PRIMARY: Color32 = Color32::from_rgb(66, 165, 245);

    /// Success/active - green
    pub const SUCCESS: Color32 = Color32::from_rgb(129, 199, 132);

    /// Error - red
    pub const ERROR: Color32 = Color32::from_rgb(239, 83, 80);
}

/// Rounding for compact elements
pub const ROUNDING_SMALL: Rounding = Rounding {
    nw: 4.0,
    ne: 4.0,
    sw: 4.0,
    se: 4.0,
};

/// Color of a port kind, dimmed while the group is collapsed.
pub fn port_color(kind: PortKind, expanded: bool) -> Color32 {
    let color = match kind {
        PortKind::Audio => signal::AUDIO,
        PortKind::Cv => signal::CV,
    };
    if expanded {
        color
    } else {
        color.gamma_multiply(0.35)
    }
}

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.panel_fill = background::MAIN;
    visuals.window_fill = background::PANEL;

    visuals.widgets.inactive.bg_fill = background::PEDAL;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.inactive.rounding = ROUNDING_SMALL;

    visuals.widgets.hovered.bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.hovered.rounding = ROUNDING_SMALL;

    visuals.widgets.active.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.fg_stroke = Stroke::new(1.5, accent::PRIMARY);
    visuals.widgets.active.rounding = ROUNDING_SMALL;

    visuals.selection.bg_fill = accent::PRIMARY.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent::PRIMARY);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 4.0);

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_colors_are_distinct() {
        assert_ne!(signal::AUDIO, signal::CV);
    }

    #[test]
    fn collapsed_ports_are_dimmed() {
        for kind in PortKind::ALL {
            assert_ne!(port_color(kind, true), port_color(kind, false));
        }
        assert_eq!(port_color(PortKind::Audio, true), signal::AUDIO);
    }
}
