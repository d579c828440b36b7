//! Onboard Runtime Library
//!
//! Flow driver components:
//! - Event-to-transition controller with the single-shot completion handler
//! - The PageView rendering seam
//! - A terminal frontend

// Re-export from onboard-common for convenience
pub use onboard_common::{config, page, sequence};

// Runtime-specific modules
pub mod controller;
pub mod ui;
