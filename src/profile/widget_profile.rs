//! Widget profiles.
//!
//! A profile describes one kind of plugin icon: which datum carries its
//! screenshot and which controller variant drives it. Profiles are stored
//! as JSON and ship with presets for the Cardinal plugin family.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::{
    CollapsePolicy, KnobPageController, PortVisibilityController, WidgetController,
    DEFAULT_COLLAPSE_DELAY,
};
use crate::icon::{Icon, IconHandle, IconTree};

/// Current profile format version.
/// Increment this when making breaking changes to the format.
pub const PROFILE_VERSION: u32 = 1;

/// Screenshot key of the main Cardinal plugin.
pub const CARDINAL_SCREENSHOT_KEY: &str = "https://distrho.kx.studio/plugins/cardinal#screenshot";

/// Screenshot key of Cardinal FX.
pub const CARDINAL_FX_SCREENSHOT_KEY: &str =
    "https://distrho.kx.studio/plugins/cardinal#fx#screenshot";

/// Screenshot key of Cardinal Synth.
pub const CARDINAL_SYNTH_SCREENSHOT_KEY: &str =
    "https://distrho.kx.studio/plugins/cardinal#synth#screenshot";

/// Names accepted by [`WidgetProfile::preset`].
pub const PRESET_NAMES: [&str; 3] = ["cardinal", "cardinal-fx", "cardinal-synth"];

/// A complete widget profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetProfile {
    /// Human-readable name of the widget kind.
    pub name: String,
    /// Profile format version for future compatibility.
    pub version: u32,
    /// Key of the `change` events carrying the screenshot.
    pub screenshot_key: String,
    /// Controller variant and its settings.
    pub variant: Variant,
}

/// Controller variant of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Variant {
    /// Audio/CV port visibility toggles.
    PortVisibility {
        /// Port counts of the icon markup.
        #[serde(default)]
        layout: PortLayout,
        /// Collapse ports after the first screenshot; `None` disables it.
        #[serde(default)]
        auto_collapse: Option<AutoCollapse>,
    },
    /// Three selectable knob pages.
    KnobPages,
}

/// Number of ports per group in the icon markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortLayout {
    pub audio_inputs: usize,
    pub audio_outputs: usize,
    pub cv_inputs: usize,
    pub cv_outputs: usize,
}

impl Default for PortLayout {
    fn default() -> Self {
        Self {
            audio_inputs: 2,
            audio_outputs: 2,
            cv_inputs: 2,
            cv_outputs: 2,
        }
    }
}

/// Settings of the auto-collapse check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCollapse {
    /// Delay between the first screenshot and the check, in milliseconds.
    pub delay_ms: u64,
}

impl AutoCollapse {
    /// The delay as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AutoCollapse {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_COLLAPSE_DELAY.as_millis() as u64,
        }
    }
}

impl WidgetProfile {
    /// Create a profile with the current format version.
    pub fn new(name: impl Into<String>, screenshot_key: impl Into<String>, variant: Variant) -> Self {
        Self {
            name: name.into(),
            version: PROFILE_VERSION,
            screenshot_key: screenshot_key.into(),
            variant,
        }
    }

    /// Main Cardinal plugin: port toggles with auto-collapse.
    pub fn cardinal() -> Self {
        Self::new(
            "Cardinal",
            CARDINAL_SCREENSHOT_KEY,
            Variant::PortVisibility {
                layout: PortLayout {
                    audio_inputs: 8,
                    audio_outputs: 8,
                    cv_inputs: 10,
                    cv_outputs: 10,
                },
                auto_collapse: Some(AutoCollapse::default()),
            },
        )
    }

    /// Cardinal FX: paged knobs.
    pub fn cardinal_fx() -> Self {
        Self::new("Cardinal FX", CARDINAL_FX_SCREENSHOT_KEY, Variant::KnobPages)
    }

    /// Cardinal Synth: port toggles only.
    pub fn cardinal_synth() -> Self {
        Self::new(
            "Cardinal Synth",
            CARDINAL_SYNTH_SCREENSHOT_KEY,
            Variant::PortVisibility {
                layout: PortLayout {
                    audio_inputs: 0,
                    audio_outputs: 2,
                    cv_inputs: 0,
                    cv_outputs: 0,
                },
                auto_collapse: None,
            },
        )
    }

    /// Look up a built-in profile by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "cardinal" => Some(Self::cardinal()),
            "cardinal-fx" => Some(Self::cardinal_fx()),
            "cardinal-synth" => Some(Self::cardinal_synth()),
            _ => None,
        }
    }

    /// Check if this profile version is compatible with the current format.
    pub fn is_compatible(&self) -> bool {
        self.version <= PROFILE_VERSION
    }

    /// Build the icon markup this profile describes.
    pub fn icon_tree(&self) -> IconTree {
        match self.variant {
            Variant::PortVisibility { layout, .. } => IconTree::port_pedal(
                (layout.audio_inputs, layout.audio_outputs),
                (layout.cv_inputs, layout.cv_outputs),
            ),
            Variant::KnobPages => IconTree::paged_pedal(),
        }
    }

    /// Build the controller this profile describes for an icon.
    pub fn build_controller<I: Icon + 'static>(
        &self,
        icon: IconHandle<I>,
    ) -> Box<dyn WidgetController> {
        let key = self.screenshot_key.clone();
        match self.variant {
            Variant::PortVisibility { auto_collapse, .. } => {
                let policy = match auto_collapse {
                    Some(settings) => CollapsePolicy::OnFirstScreenshot {
                        delay: settings.delay(),
                    },
                    None => CollapsePolicy::Never,
                };
                Box::new(PortVisibilityController::new(icon, key, policy))
            }
            Variant::KnobPages => Box::new(KnobPageController::new(icon, key)),
        }
    }
}

impl Default for WidgetProfile {
    fn default() -> Self {
        Self::cardinal()
    }
}

/// Error type for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// File I/O error.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Incompatible profile version.
    #[error("Incompatible profile version: found {found}, expected <= {expected}")]
    IncompatibleVersion { found: u32, expected: u32 },
    /// The profile does not name a screenshot key.
    #[error("Profile has an empty screenshot key")]
    EmptyScreenshotKey,
    /// No built-in profile has this name.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Save a profile to a JSON file.
pub fn save_to_file(profile: &WidgetProfile, path: &std::path::Path) -> Result<(), ProfileError> {
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a profile from a JSON file.
pub fn load_from_file(path: &std::path::Path) -> Result<WidgetProfile, ProfileError> {
    let json = std::fs::read_to_string(path)?;
    let profile: WidgetProfile = serde_json::from_str(&json)?;

    if !profile.is_compatible() {
        return Err(ProfileError::IncompatibleVersion {
            found: profile.version,
            expected: PROFILE_VERSION,
        });
    }
    if profile.screenshot_key.is_empty() {
        return Err(ProfileError::EmptyScreenshotKey);
    }

    log::debug!("loaded profile '{}' from {}", profile.name, path.display());
    Ok(profile)
}

/// Resolve a preset name or a path to a profile file.
pub fn resolve(name_or_path: &str) -> Result<WidgetProfile, ProfileError> {
    if let Some(profile) = WidgetProfile::preset(name_or_path) {
        return Ok(profile);
    }
    let path = std::path::Path::new(name_or_path);
    if path.exists() {
        load_from_file(path)
    } else {
        Err(ProfileError::UnknownPreset(name_or_path.to_string()))
    }
}
