//! State management modules for the Mockbox shell.
//!
//! This module contains state-only logic (no UI or platform concerns):
//! - Theme state (explicit mode, resolved theme)
//! - Navigation state (in-flight flag, current and target locations)

mod theme_state;
mod navigation_state;

pub use theme_state::ThemePreference;
pub use navigation_state::NavigationState;
