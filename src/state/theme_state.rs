//! Theme preference state.
//!
//! This module holds the user's theme choice together with the theme that is
//! actually rendered.

use crate::theme::{ResolvedTheme, ThemeMode};

/// The user's theme choice and the concrete theme derived from it.
///
/// Responsibilities:
/// - Tracking the explicit mode (`light`, `dark` or `system`)
/// - Tracking the resolved theme, which is always concrete
///
/// Only `mode` is ever persisted; `resolved` is recomputed at each start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePreference {
    /// The user's explicit choice
    mode: ThemeMode,
    /// The theme currently applied
    resolved: ResolvedTheme,
}

impl ThemePreference {
    /// Creates a preference for `mode`, resolved to the pre-resolution default.
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            resolved: ResolvedTheme::default(),
        }
    }

    // ===== Queries =====

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn resolved(&self) -> ResolvedTheme {
        self.resolved
    }

    /// Returns true when the OS preference decides the rendered theme.
    pub fn follows_system(&self) -> bool {
        self.mode == ThemeMode::System
    }

    // ===== Mutations =====

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Resolves the theme from the current mode and the OS signal.
    ///
    /// An absent OS signal (`None`) resolves `system` to dark.
    pub fn resolve(&mut self, os_prefers_dark: Option<bool>) -> ResolvedTheme {
        self.resolved = match self.mode.explicit() {
            Some(theme) => theme,
            None => ResolvedTheme::from_prefers_dark(os_prefers_dark.unwrap_or(true)),
        };
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_system_rendered_dark() {
        let preference = ThemePreference::default();
        assert_eq!(preference.mode(), ThemeMode::System);
        assert_eq!(preference.resolved(), ResolvedTheme::Dark);
        assert!(preference.follows_system());
    }

    #[test]
    fn test_explicit_mode_ignores_os_signal() {
        let mut preference = ThemePreference::new(ThemeMode::Light);
        assert_eq!(preference.resolve(Some(true)), ResolvedTheme::Light);
        preference.set_mode(ThemeMode::Dark);
        assert_eq!(preference.resolve(Some(false)), ResolvedTheme::Dark);
    }

    #[test]
    fn test_system_mode_follows_os_signal() {
        let mut preference = ThemePreference::new(ThemeMode::System);
        assert_eq!(preference.resolve(Some(false)), ResolvedTheme::Light);
        assert_eq!(preference.resolve(Some(true)), ResolvedTheme::Dark);
    }

    #[test]
    fn test_system_mode_without_signal_falls_back_to_dark() {
        let mut preference = ThemePreference::new(ThemeMode::System);
        assert_eq!(preference.resolve(None), ResolvedTheme::Dark);
    }
}
