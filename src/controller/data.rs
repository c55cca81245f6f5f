//! Per-instance data of a widget.
//!
//! A small key/value map created at start and owned by exactly one
//! controller. Only boolean values are ever stored.

use std::collections::BTreeMap;

use crate::icon::PortKind;

/// Key of the audio port visibility flag.
pub const VISIBILITY_AUDIO: &str = "visibility-audio";

/// Key of the CV port visibility flag.
pub const VISIBILITY_CV: &str = "visibility-cv";

/// Key of the flag recording that the port layout was touched, either by the
/// user or by the first screenshot.
pub const VISIBILITY_TRIGGERED: &str = "visibility-triggered";

/// Returns the data key of a port kind's visibility flag.
pub fn visibility_key(kind: PortKind) -> &'static str {
    match kind {
        PortKind::Audio => VISIBILITY_AUDIO,
        PortKind::Cv => VISIBILITY_CV,
    }
}

/// Instance-scoped data of one widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceData {
    values: BTreeMap<&'static str, bool>,
}

impl InstanceData {
    /// Data of a port visibility widget: both kinds visible.
    ///
    /// With `track_trigger` the `visibility-triggered` flag is created too.
    pub fn port_visibility(track_trigger: bool) -> Self {
        let mut data = Self::default();
        data.values.insert(VISIBILITY_AUDIO, true);
        data.values.insert(VISIBILITY_CV, true);
        if track_trigger {
            data.values.insert(VISIBILITY_TRIGGERED, false);
        }
        data
    }

    /// Raw lookup by key.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    /// Visibility flag of a port kind. Missing flags read as visible.
    pub fn visible(&self, kind: PortKind) -> bool {
        self.get(visibility_key(kind)).unwrap_or(true)
    }

    /// Store the visibility flag of a port kind.
    pub fn set_visible(&mut self, kind: PortKind, visible: bool) {
        self.values.insert(visibility_key(kind), visible);
    }

    /// Returns true once the trigger flag was set.
    pub fn triggered(&self) -> bool {
        self.get(VISIBILITY_TRIGGERED).unwrap_or(false)
    }

    /// Set the trigger flag. It cannot be cleared again.
    ///
    /// Does nothing if the data does not track the trigger.
    pub fn mark_triggered(&mut self) {
        if let Some(triggered) = self.values.get_mut(VISIBILITY_TRIGGERED) {
            *triggered = true;
        }
    }
}
