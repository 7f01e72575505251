//! Settings module
//!
//! This module provides application settings management including:
//! - Hotkey binding data model and display helpers
//! - Core settings data structure and persistence
//! - Default value functions for serde

mod core;
mod defaults;

// Re-export main types
pub use core::{HotkeyBinding, Settings, Theme};
