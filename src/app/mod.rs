//! Coordinators for the Mockbox shell.
//!
//! This module contains the two state-machine coordinators and the generic
//! settings persistence helper.

mod theme_coordinator;
mod navigation_coordinator;
mod settings_coordinator;

pub use theme_coordinator::{EngineState, ThemePreferenceEngine};
pub use navigation_coordinator::NavigationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
