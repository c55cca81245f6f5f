//! Demo host for widget controllers
//!
//! Owns one icon tree and its controller, renders the tree with egui,
//! forwards clicks, pushes screenshot changes and polls deferred work
//! every frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use base64::Engine as _;
use eframe::egui::{self, Align, Layout, RichText};

use super::theme;
use crate::controller::{Control, HostEvent, WidgetController};
use crate::icon::{Icon, IconHandle, IconTree, Marker, Page, PortDirection, PortKind, Role};
use crate::profile::WidgetProfile;

/// Main application state of the demo host
pub struct HostApp {
    profile: WidgetProfile,

    /// `None` after the icon was destroyed
    icon: Option<Rc<RefCell<IconTree>>>,

    controller: Box<dyn WidgetController>,

    /// Last status or error message to display
    status: Option<Result<String, String>>,

    /// Whether theme has been applied
    theme_applied: bool,
}

impl HostApp {
    /// Create the host and start a widget for `profile`.
    pub fn new(profile: WidgetProfile) -> Self {
        let (icon, controller) = spawn_widget(&profile);
        Self {
            profile,
            icon: Some(icon),
            controller,
            status: None,
            theme_applied: false,
        }
    }

    /// Replace the widget with a freshly started one.
    fn respawn(&mut self) {
        let (icon, controller) = spawn_widget(&self.profile);
        self.icon = Some(icon);
        self.controller = controller;
        self.status = Some(Ok("Widget restarted".to_string()));
    }

    /// Drop the icon while the controller lives on.
    fn destroy_icon(&mut self) {
        self.icon = None;
        self.status = Some(Ok("Icon destroyed".to_string()));
    }

    fn push_screenshot(&mut self, encoded: String) {
        let event = HostEvent::change(self.profile.screenshot_key.clone(), encoded);
        self.controller.handle_event(&event);
    }

    fn clear_screenshot(&mut self) {
        let event = HostEvent::cleared(self.profile.screenshot_key.clone());
        self.controller.handle_event(&event);
    }

    /// Ask for a PNG file and push it as the screenshot
    fn load_screenshot(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read(&path) {
            Ok(bytes) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
                self.push_screenshot(encoded);
                self.status = Some(Ok(format!("Loaded {}", path.display())));
            }
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                self.status = Some(Err(format!("Cannot read {}: {e}", path.display())));
            }
        }
    }

    fn toggle_connection(&mut self, role: Role, index: usize) {
        if let Some(icon) = &self.icon {
            let mut icon = icon.borrow_mut();
            let connected = icon.element(role, index).is_some_and(|element| {
                Marker::CONNECTIONS
                    .iter()
                    .any(|marker| element.has_marker(*marker))
            });
            icon.set_connected(role, index, !connected);
        }
    }

    /// Draw the side panel with host-side actions
    fn draw_host_controls(&mut self, ui: &mut egui::Ui) -> HostActions {
        let mut actions = HostActions::default();

        ui.label(RichText::new(&self.profile.name).size(18.0).color(theme::text::PRIMARY).strong());
        ui.label(RichText::new(&self.profile.screenshot_key).color(theme::text::SECONDARY).small());
        ui.separator();

        ui.label(RichText::new("Host events").color(theme::text::SECONDARY));
        if ui.button("Load screenshot…").clicked() {
            actions.load_screenshot = true;
        }
        if ui.button("Clear screenshot").clicked() {
            actions.clear_screenshot = true;
        }
        ui.separator();

        ui.label(RichText::new("Lifecycle").color(theme::text::SECONDARY));
        if ui.button("Restart widget").clicked() {
            actions.respawn = true;
        }
        if ui
            .add_enabled(self.icon.is_some(), egui::Button::new("Destroy icon"))
            .clicked()
        {
            actions.destroy_icon = true;
        }

        if let Some(deadline) = self.controller.next_deadline() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            ui.separator();
            ui.label(
                RichText::new(format!("Collapse check in {} ms", remaining.as_millis()))
                    .color(theme::accent::PRIMARY),
            );
        }

        actions
    }

    /// Draw the icon from the tree
    fn draw_icon(&self, ui: &mut egui::Ui) -> IconActions {
        let mut actions = IconActions::default();
        let Some(icon) = &self.icon else {
            ui.label(RichText::new("No icon").color(theme::text::DISABLED));
            return actions;
        };
        let icon = icon.borrow();

        egui::Frame::none()
            .fill(theme::background::PEDAL)
            .rounding(theme::ROUNDING_SMALL)
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                draw_toggles(ui, &icon, &mut actions);
                draw_pages(ui, &icon, &mut actions);
                draw_display_areas(ui, &icon);
                draw_ports(ui, &icon, &mut actions);
            });

        actions
    }

    /// Draw the bottom status bar
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            match &self.status {
                Some(Err(error)) => {
                    ui.label(RichText::new(format!("⚠ {}", error)).color(theme::accent::ERROR).small());
                }
                Some(Ok(message)) => {
                    ui.label(RichText::new(message).color(theme::accent::SUCCESS).small());
                }
                None => {
                    ui.label(RichText::new("Ready").color(theme::text::SECONDARY).small());
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{:?}", self.controller.screenshot_state()))
                        .color(theme::text::DISABLED)
                        .small(),
                );
            });
        });
    }
}

fn spawn_widget(profile: &WidgetProfile) -> (Rc<RefCell<IconTree>>, Box<dyn WidgetController>) {
    let icon = Rc::new(RefCell::new(profile.icon_tree()));
    let mut controller = profile.build_controller(IconHandle::new(&icon));
    controller.handle_event(&HostEvent::Start);
    log::info!("started '{}' widget", profile.name);
    (icon, controller)
}

fn draw_toggles(ui: &mut egui::Ui, icon: &IconTree, actions: &mut IconActions) {
    ui.horizontal(|ui| {
        for kind in PortKind::ALL {
            let role = Role::VisibilityToggle(kind);
            if let Some(label) = icon.text(role) {
                if ui.button(label).clicked() {
                    actions.click = Some(Control::VisibilityToggle(kind));
                }
            }
        }
    });
}

fn draw_pages(ui: &mut egui::Ui, icon: &IconTree, actions: &mut IconActions) {
    if count_pages(icon) == 0 {
        return;
    }
    ui.horizontal(|ui| {
        for page in Page::ALL {
            let role = Role::PageSelector(page);
            let Some(label) = icon.text(role) else {
                continue;
            };
            let selected = icon.any_marked(role, Marker::Selected);
            if ui.selectable_label(selected, label).clicked() {
                actions.click = Some(Control::PageSelector(page));
            }
        }
    });
    for page in Page::ALL {
        if icon.display(Role::KnobPage(page)).is_some_and(|display| display.is_shown()) {
            ui.label(RichText::new(format!("Knob page {}", page.number())).color(theme::text::PRIMARY));
        }
    }
}

fn draw_display_areas(ui: &mut egui::Ui, icon: &IconTree) {
    let shown = |role| icon.display(role).is_some_and(|display| display.is_shown());

    if shown(Role::ScreenshotArea) {
        let text = match icon.background_image(Role::ScreenshotImage).and_then(screenshot_size) {
            Some(size) => format!("Screenshot ({size} bytes)"),
            None => "Screenshot (unreadable)".to_string(),
        };
        ui.label(RichText::new(text).color(theme::accent::SUCCESS));
    }
    if shown(Role::CommentArea) {
        ui.label(RichText::new("No screenshot yet").color(theme::text::DISABLED).italics());
    }
}

fn draw_ports(ui: &mut egui::Ui, icon: &IconTree, actions: &mut IconActions) {
    for role in Role::PORT_GROUPS {
        let Role::Ports(kind, direction) = role else {
            continue;
        };
        if icon.count(role) == 0 {
            continue;
        }
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} {}", kind.name(), direction.name()))
                    .color(theme::text::SECONDARY)
                    .small(),
            );
            for (index, element) in icon.matching(role).enumerate() {
                let expanded = element.has_marker(Marker::Expanded);
                let connected = element.has_marker(connection_marker(direction));
                let symbol = if connected { "◉" } else { "○" };
                let button = egui::Button::new(
                    RichText::new(symbol).color(theme::port_color(kind, expanded)),
                )
                .small();
                if ui.add(button).clicked() {
                    actions.toggle_connection = Some((role, index));
                }
            }
        });
    }
}

fn connection_marker(direction: PortDirection) -> Marker {
    match direction {
        PortDirection::Input => Marker::InputConnected,
        PortDirection::Output => Marker::OutputConnected,
    }
}

/// Size of the image carried by a PNG data URL
fn screenshot_size(url: &str) -> Option<usize> {
    let encoded = url.strip_prefix("data:image/png;base64,")?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()
        .map(|bytes| bytes.len())
}

fn count_pages(icon: &IconTree) -> usize {
    Page::ALL
        .iter()
        .map(|page| icon.count(Role::KnobPage(*page)))
        .sum()
}

/// Actions collected from the host controls for deferred execution
#[derive(Default)]
struct HostActions {
    load_screenshot: bool,
    clear_screenshot: bool,
    respawn: bool,
    destroy_icon: bool,
}

/// Actions collected from the icon while it is borrowed
#[derive(Default)]
struct IconActions {
    click: Option<Control>,
    toggle_connection: Option<(Role, usize)>,
}

impl eframe::App for HostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.controller.poll(Instant::now());

        let host_actions = egui::SidePanel::left("host_controls")
            .frame(egui::Frame::none()
                .fill(theme::background::PANEL)
                .inner_margin(egui::Margin::same(12.0)))
            .show(ctx, |ui| self.draw_host_controls(ui))
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::none()
                .fill(theme::background::PANEL)
                .inner_margin(egui::Margin::symmetric(0.0, 4.0)))
            .show(ctx, |ui| {
                self.draw_status_bar(ui);
            });

        let icon_actions = egui::CentralPanel::default()
            .show(ctx, |ui| self.draw_icon(ui))
            .inner;

        // Handle deferred actions once the icon is no longer borrowed
        if let Some(control) = icon_actions.click {
            self.controller.click(control);
        }
        if let Some((role, index)) = icon_actions.toggle_connection {
            self.toggle_connection(role, index);
        }
        if host_actions.load_screenshot {
            self.load_screenshot();
        }
        if host_actions.clear_screenshot {
            self.clear_screenshot();
        }
        if host_actions.destroy_icon {
            self.destroy_icon();
        }
        if host_actions.respawn {
            self.respawn();
        }

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
