//! Profile module
//!
//! Widget profile save/load functionality using serde and JSON.

pub mod widget_profile;

pub use widget_profile::{
    load_from_file, resolve, save_to_file, AutoCollapse, PortLayout, ProfileError, Variant,
    WidgetProfile, PRESET_NAMES, PROFILE_VERSION,
};
