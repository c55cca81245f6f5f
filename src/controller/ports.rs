//! Audio/CV port visibility controller.
//!
//! Two independent toggles expand or collapse the audio and CV port groups
//! of a pedal icon. With [`CollapsePolicy::OnFirstScreenshot`] the port
//! groups are also collapsed once after a patch screenshot arrives, provided
//! the user never touched the audio toggle and the icon shows cables.

use std::time::{Duration, Instant};

use super::data::InstanceData;
use super::deferred::Deferred;
use super::event::{Control, HostEvent};
use super::screenshot::{self, ScreenshotState};
use super::WidgetController;
use crate::icon::{Icon, IconHandle, Marker, PortKind, Role};

/// What happens to the port groups when the first screenshot arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapsePolicy {
    /// Port groups are only changed by the toggles.
    Never,
    /// Collapse all port groups `delay` after the first screenshot, unless
    /// the user toggled the audio ports before.
    OnFirstScreenshot { delay: Duration },
}

impl CollapsePolicy {
    fn tracks_trigger(&self) -> bool {
        matches!(self, CollapsePolicy::OnFirstScreenshot { .. })
    }
}

/// Controller of a pedal icon with audio and CV port groups.
pub struct PortVisibilityController<I> {
    icon: IconHandle<I>,
    screenshot_key: String,
    policy: CollapsePolicy,
    /// Created by the first start event.
    data: Option<InstanceData>,
    bindings: Vec<Control>,
    screenshot: ScreenshotState,
    collapse_check: Option<Deferred>,
}

impl<I: Icon> PortVisibilityController<I> {
    /// Create a controller for the icon behind `icon`.
    pub fn new(icon: IconHandle<I>, screenshot_key: impl Into<String>, policy: CollapsePolicy) -> Self {
        Self {
            icon,
            screenshot_key: screenshot_key.into(),
            policy,
            data: None,
            bindings: Vec::new(),
            screenshot: ScreenshotState::default(),
            collapse_check: None,
        }
    }

    /// Instance data, once started.
    pub fn data(&self) -> Option<&InstanceData> {
        self.data.as_ref()
    }

    /// Returns true while a collapse check is scheduled but has not run.
    pub fn collapse_pending(&self) -> bool {
        self.collapse_check.is_some_and(|check| check.is_pending())
    }

    fn start(&mut self) {
        if self.data.is_some() {
            log::warn!("widget already started, ignoring repeated start");
            return;
        }

        let data = InstanceData::port_visibility(self.policy.tracks_trigger());
        self.icon.with(|icon| {
            for kind in PortKind::ALL {
                render_ports(icon, kind, data.visible(kind));
            }
        });
        self.data = Some(data);
        self.bindings = PortKind::ALL.map(Control::VisibilityToggle).to_vec();
        log::debug!("port visibility widget started ({:?})", self.policy);
    }

    fn toggle(&mut self, kind: PortKind) {
        let Some(data) = self.data.as_mut() else {
            return;
        };

        let visible = data.visible(kind);
        if self.icon.with(|icon| render_ports(icon, kind, !visible)).is_none() {
            return;
        }
        data.set_visible(kind, !visible);

        // Only the audio toggle counts as touching the layout.
        if kind == PortKind::Audio {
            data.mark_triggered();
        }
    }

    fn change(&mut self, uri: &str, value: Option<&str>, now: Instant) {
        if uri != self.screenshot_key {
            return;
        }

        if let Some(state) = self.icon.with(|icon| screenshot::apply(icon, value)) {
            self.screenshot = state;
        }

        let CollapsePolicy::OnFirstScreenshot { delay } = self.policy else {
            return;
        };
        if screenshot::non_empty(value).is_none() {
            return;
        }
        if let Some(data) = self.data.as_mut() {
            if !data.triggered() {
                data.mark_triggered();
                self.collapse_check = Some(Deferred::after(now, delay));
                log::debug!("first screenshot received, collapse check in {delay:?}");
            }
        }
    }
}

impl<I: Icon> WidgetController for PortVisibilityController<I> {
    fn screenshot_key(&self) -> &str {
        &self.screenshot_key
    }

    fn handle_event_at(&mut self, event: &HostEvent, now: Instant) {
        match event {
            HostEvent::Start => self.start(),
            HostEvent::Change { uri, value } => self.change(uri, value.as_deref(), now),
        }
    }

    fn click(&mut self, control: Control) {
        if !self.bindings.contains(&control) {
            log::debug!("no responder for {control:?}");
            return;
        }
        if let Control::VisibilityToggle(kind) = control {
            self.toggle(kind);
        }
    }

    fn poll(&mut self, now: Instant) {
        let Some(check) = self.collapse_check.as_mut() else {
            return;
        };
        if !check.is_due(now) {
            return;
        }

        let collapsed = match self.icon.with(collapse_if_connected) {
            Some(collapsed) => collapsed,
            // Busy icon: keep the check for the next poll.
            None if self.icon.is_alive() => return,
            None => false,
        };
        check.fire(now);

        if collapsed {
            if let Some(data) = self.data.as_mut() {
                for kind in PortKind::ALL {
                    data.set_visible(kind, false);
                }
            }
            log::info!("collapsed port groups of freshly loaded patch");
        } else {
            log::debug!("collapse check found nothing to do");
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.collapse_check
            .filter(|check| check.is_pending())
            .map(|check| check.due())
    }

    fn screenshot_state(&self) -> ScreenshotState {
        self.screenshot
    }

    fn bindings(&self) -> &[Control] {
        &self.bindings
    }
}

/// Expand or collapse both port groups of one kind and relabel its toggle.
fn render_ports<I: Icon>(icon: &mut I, kind: PortKind, expanded: bool) {
    for role in Role::port_groups(kind) {
        if expanded {
            icon.add_marker(role, Marker::Expanded);
        } else {
            icon.remove_marker(role, Marker::Expanded);
        }
    }
    let label = if expanded {
        kind.hide_label()
    } else {
        kind.show_label()
    };
    icon.set_text(Role::VisibilityToggle(kind), label);
}

/// Collapse every port group if any cable is plugged in.
///
/// Returns true if the icon was changed.
fn collapse_if_connected<I: Icon>(icon: &mut I) -> bool {
    if !icon.has_connections() {
        return false;
    }
    for role in Role::PORT_GROUPS {
        icon.remove_marker(role, Marker::Expanded);
    }
    for kind in PortKind::ALL {
        icon.set_text(Role::VisibilityToggle(kind), kind.show_label());
    }
    true
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::controller::data::{VISIBILITY_AUDIO, VISIBILITY_CV, VISIBILITY_TRIGGERED};
    use crate::controller::deferred::DEFAULT_COLLAPSE_DELAY;
    use crate::icon::{Display, IconTree, Page, PortDirection};

    const KEY: &str = "https://example.org/plugins/pedal#screenshot";
    const PNG: &str = "iVBORw0KGgo=";
    const AUDIO_IN: Role = Role::Ports(PortKind::Audio, PortDirection::Input);
    const CV_OUT: Role = Role::Ports(PortKind::Cv, PortDirection::Output);

    const AUTO: CollapsePolicy = CollapsePolicy::OnFirstScreenshot {
        delay: DEFAULT_COLLAPSE_DELAY,
    };

    fn setup(policy: CollapsePolicy) -> (Rc<RefCell<IconTree>>, PortVisibilityController<IconTree>) {
        let icon = Rc::new(RefCell::new(IconTree::port_pedal((2, 2), (2, 2))));
        let controller = PortVisibilityController::new(IconHandle::new(&icon), KEY, policy);
        (icon, controller)
    }

    fn started(policy: CollapsePolicy) -> (Rc<RefCell<IconTree>>, PortVisibilityController<IconTree>) {
        let (icon, mut controller) = setup(policy);
        controller.handle_event(&HostEvent::Start);
        (icon, controller)
    }

    fn expanded(icon: &Rc<RefCell<IconTree>>, kind: PortKind) -> bool {
        let icon = icon.borrow();
        let [input, output] = Role::port_groups(kind);
        let marked = icon.all_marked(input, Marker::Expanded);
        assert_eq!(marked, icon.all_marked(output, Marker::Expanded));
        assert_eq!(marked, icon.any_marked(input, Marker::Expanded));
        marked
    }

    fn label(icon: &Rc<RefCell<IconTree>>, kind: PortKind) -> String {
        icon.borrow()
            .text(Role::VisibilityToggle(kind))
            .unwrap_or_default()
            .to_string()
    }

    fn assert_in_sync(icon: &Rc<RefCell<IconTree>>, controller: &PortVisibilityController<IconTree>) {
        let data = controller.data().unwrap();
        for kind in PortKind::ALL {
            let visible = data.visible(kind);
            assert_eq!(expanded(icon, kind), visible);
            assert_eq!(label(icon, kind) == kind.hide_label(), visible);
        }
    }

    #[test]
    fn test_start_initializes_data() {
        let (icon, controller) = started(AUTO);
        let data = controller.data().unwrap();

        assert_eq!(data.get(VISIBILITY_AUDIO), Some(true));
        assert_eq!(data.get(VISIBILITY_CV), Some(true));
        assert_eq!(data.get(VISIBILITY_TRIGGERED), Some(false));
        assert_eq!(label(&icon, PortKind::Audio), "Hide Audio");
        assert_eq!(label(&icon, PortKind::Cv), "Hide CV");
        assert_in_sync(&icon, &controller);
        assert_eq!(
            controller.bindings(),
            &[
                Control::VisibilityToggle(PortKind::Audio),
                Control::VisibilityToggle(PortKind::Cv)
            ]
        );
    }

    #[test]
    fn test_plain_variant_has_no_trigger_flag() {
        let (_icon, controller) = started(CollapsePolicy::Never);
        assert_eq!(controller.data().unwrap().get(VISIBILITY_TRIGGERED), None);
    }

    #[test]
    fn test_audio_toggle_example() {
        let (icon, mut controller) = started(AUTO);

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert_eq!(label(&icon, PortKind::Audio), "Show Audio");
        assert!(!expanded(&icon, PortKind::Audio));

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert_eq!(label(&icon, PortKind::Audio), "Hide Audio");
        assert!(expanded(&icon, PortKind::Audio));
    }

    #[test]
    fn test_toggle_sequences_stay_in_sync() {
        let (icon, mut controller) = started(CollapsePolicy::Never);
        let clicks = [
            PortKind::Audio,
            PortKind::Cv,
            PortKind::Cv,
            PortKind::Audio,
            PortKind::Audio,
            PortKind::Cv,
        ];
        for kind in clicks {
            controller.click(Control::VisibilityToggle(kind));
            assert_in_sync(&icon, &controller);
        }
    }

    #[test]
    fn test_toggles_are_independent() {
        let (icon, mut controller) = started(AUTO);

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert!(controller.data().unwrap().visible(PortKind::Cv));
        assert!(expanded(&icon, PortKind::Cv));
        assert_eq!(label(&icon, PortKind::Cv), "Hide CV");

        controller.click(Control::VisibilityToggle(PortKind::Cv));
        assert!(!controller.data().unwrap().visible(PortKind::Audio));
        assert!(!expanded(&icon, PortKind::Audio));
        assert_eq!(label(&icon, PortKind::Audio), "Show Audio");
    }

    #[test]
    fn test_only_audio_toggle_sets_trigger() {
        let (_icon, mut controller) = started(AUTO);

        controller.click(Control::VisibilityToggle(PortKind::Cv));
        assert!(!controller.data().unwrap().triggered());

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert!(controller.data().unwrap().triggered());

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert!(controller.data().unwrap().triggered());
    }

    #[test]
    fn test_clicks_before_start_are_ignored() {
        let (icon, mut controller) = setup(AUTO);
        controller.click(Control::VisibilityToggle(PortKind::Audio));

        assert!(controller.data().is_none());
        assert_eq!(label(&icon, PortKind::Audio), "Show Audio");
    }

    #[test]
    fn test_page_clicks_are_ignored() {
        let (icon, mut controller) = started(CollapsePolicy::Never);
        let before = icon.borrow().elements().to_vec();

        controller.click(Control::PageSelector(Page::Second));
        assert_eq!(icon.borrow().elements(), before.as_slice());
    }

    #[test]
    fn test_repeated_start_keeps_state() {
        let (icon, mut controller) = started(AUTO);
        controller.click(Control::VisibilityToggle(PortKind::Audio));
        controller.handle_event(&HostEvent::Start);

        assert!(!controller.data().unwrap().visible(PortKind::Audio));
        assert!(controller.data().unwrap().triggered());
        assert_in_sync(&icon, &controller);
    }

    #[test]
    fn test_screenshot_change_toggles_areas() {
        let (icon, mut controller) = started(CollapsePolicy::Never);

        controller.handle_event(&HostEvent::change(KEY, PNG));
        assert_eq!(controller.screenshot_state(), ScreenshotState::ScreenshotShown);
        assert_eq!(icon.borrow().display(Role::CommentArea), Some(Display::None));
        assert_eq!(icon.borrow().display(Role::ScreenshotArea), Some(Display::Default));

        controller.handle_event(&HostEvent::cleared(KEY));
        assert_eq!(controller.screenshot_state(), ScreenshotState::CommentShown);
        assert_eq!(icon.borrow().display(Role::CommentArea), Some(Display::Default));
        assert_eq!(icon.borrow().display(Role::ScreenshotArea), Some(Display::None));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let (icon, mut controller) = started(AUTO);
        controller.handle_event(&HostEvent::change(KEY, PNG));
        let before = icon.borrow().elements().to_vec();

        controller.handle_event(&HostEvent::cleared("urn:other"));
        controller.handle_event(&HostEvent::change("urn:other", PNG));
        assert_eq!(icon.borrow().elements(), before.as_slice());
        assert_eq!(controller.screenshot_state(), ScreenshotState::ScreenshotShown);
    }

    #[test]
    fn test_auto_collapse_with_connections() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(CV_OUT, 1, true);
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        assert!(controller.collapse_pending());
        assert!(controller.data().unwrap().triggered());
        assert_eq!(controller.next_deadline(), Some(now + DEFAULT_COLLAPSE_DELAY));

        controller.poll(now + Duration::from_millis(100));
        assert!(expanded(&icon, PortKind::Audio));

        controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        assert!(!controller.collapse_pending());
        assert_eq!(controller.next_deadline(), None);
        for role in Role::PORT_GROUPS {
            assert!(!icon.borrow().any_marked(role, Marker::Expanded));
        }
        assert_eq!(label(&icon, PortKind::Audio), "Show Audio");
        assert_eq!(label(&icon, PortKind::Cv), "Show CV");
        assert_in_sync(&icon, &controller);
    }

    #[test]
    fn test_audio_click_after_auto_collapse_expands() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        let now = Instant::now();
        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        assert!(!controller.data().unwrap().visible(PortKind::Audio));

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert!(controller.data().unwrap().visible(PortKind::Audio));
        assert!(expanded(&icon, PortKind::Audio));
        assert_eq!(label(&icon, PortKind::Audio), "Hide Audio");
        assert!(!expanded(&icon, PortKind::Cv));
        assert_in_sync(&icon, &controller);
    }

    #[test]
    fn test_click_on_busy_icon_keeps_flag() {
        let (icon, mut controller) = started(AUTO);
        {
            let _guard = icon.borrow();
            controller.click(Control::VisibilityToggle(PortKind::Audio));
        }
        assert!(controller.data().unwrap().visible(PortKind::Audio));
        assert!(!controller.data().unwrap().triggered());
        assert_in_sync(&icon, &controller);

        controller.click(Control::VisibilityToggle(PortKind::Audio));
        assert!(!controller.data().unwrap().visible(PortKind::Audio));
        assert_in_sync(&icon, &controller);
    }

    #[test]
    fn test_busy_icon_delays_collapse_check() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(CV_OUT, 0, true);
        let now = Instant::now();
        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);

        {
            let _guard = icon.borrow();
            controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        }
        assert!(controller.collapse_pending());
        assert!(expanded(&icon, PortKind::Audio));

        controller.poll(now + Duration::from_secs(2));
        assert!(!controller.collapse_pending());
        assert!(!expanded(&icon, PortKind::Audio));
        assert!(!expanded(&icon, PortKind::Cv));
        assert_in_sync(&icon, &controller);
    }

    #[test]
    fn test_connection_added_before_check_runs() {
        let (icon, mut controller) = started(AUTO);
        let now = Instant::now();
        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);

        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        assert!(!expanded(&icon, PortKind::Audio));
        assert!(!expanded(&icon, PortKind::Cv));
    }

    #[test]
    fn test_auto_collapse_without_connections_is_noop() {
        let (icon, mut controller) = started(AUTO);
        controller.click(Control::VisibilityToggle(PortKind::Cv));
        let before = icon.borrow().elements().to_vec();
        let data_before = controller.data().unwrap().clone();
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        controller.poll(now + DEFAULT_COLLAPSE_DELAY);

        let icon = icon.borrow();
        for (element, old) in icon.elements().iter().zip(&before) {
            assert_eq!(element.markers, old.markers);
            if matches!(element.role, Role::VisibilityToggle(_)) {
                assert_eq!(element.text, old.text);
            }
        }
        let data = controller.data().unwrap();
        for kind in PortKind::ALL {
            assert_eq!(data.visible(kind), data_before.visible(kind));
        }
    }

    #[test]
    fn test_audio_click_before_screenshot_prevents_collapse() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        controller.click(Control::VisibilityToggle(PortKind::Audio));
        controller.click(Control::VisibilityToggle(PortKind::Audio));
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        assert!(!controller.collapse_pending());
        controller.poll(now + Duration::from_secs(5));

        assert!(expanded(&icon, PortKind::Audio));
        assert!(expanded(&icon, PortKind::Cv));
    }

    #[test]
    fn test_cv_click_does_not_prevent_collapse() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(CV_OUT, 0, true);
        controller.click(Control::VisibilityToggle(PortKind::Cv));
        controller.click(Control::VisibilityToggle(PortKind::Cv));
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        assert!(!expanded(&icon, PortKind::Cv));
    }

    #[test]
    fn test_empty_screenshot_does_not_schedule() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);

        controller.handle_event(&HostEvent::change(KEY, ""));
        assert!(!controller.collapse_pending());
        assert!(!controller.data().unwrap().triggered());
        assert_eq!(controller.screenshot_state(), ScreenshotState::CommentShown);
        assert_eq!(icon.borrow().display(Role::CommentArea), Some(Display::Default));
        assert_eq!(icon.borrow().display(Role::ScreenshotArea), Some(Display::None));
    }

    #[test]
    fn test_collapse_scheduled_once() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        controller.poll(now + DEFAULT_COLLAPSE_DELAY);

        controller.click(Control::VisibilityToggle(PortKind::Cv));
        let later = now + Duration::from_secs(1);
        controller.handle_event_at(&HostEvent::change(KEY, PNG), later);
        assert!(!controller.collapse_pending());
        controller.poll(later + DEFAULT_COLLAPSE_DELAY);
        assert!(expanded(&icon, PortKind::Cv));
    }

    #[test]
    fn test_plain_variant_never_collapses() {
        let (icon, mut controller) = started(CollapsePolicy::Never);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        let now = Instant::now();

        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        assert!(!controller.collapse_pending());
        controller.poll(now + Duration::from_secs(5));
        assert!(expanded(&icon, PortKind::Audio));
    }

    #[test]
    fn test_destroyed_icon_makes_check_noop() {
        let (icon, mut controller) = started(AUTO);
        icon.borrow_mut().set_connected(AUDIO_IN, 0, true);
        let now = Instant::now();
        controller.handle_event_at(&HostEvent::change(KEY, PNG), now);
        drop(icon);

        controller.poll(now + DEFAULT_COLLAPSE_DELAY);
        assert!(!controller.collapse_pending());
        assert!(controller.data().unwrap().visible(PortKind::Audio));
    }
}
