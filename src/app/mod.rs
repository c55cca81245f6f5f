//! Application module
//!
//! Contains the egui demo host and its theme definitions.

pub mod host_app;
pub mod theme;

pub use host_app::HostApp;
