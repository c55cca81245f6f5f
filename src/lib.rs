//! Plugin Icon Controllers
//!
//! Event handlers for plugin icon widgets: audio/CV port visibility
//! toggles, paged knob groups and the comment/screenshot preview.

pub mod app;
pub mod controller;
pub mod icon;
pub mod profile;
pub mod relay;
