//! Theme vocabulary for the Mockbox shell
//!
//! This module defines the user-facing theme modes, the concrete themes that
//! can actually be rendered, and the colour palettes GUI sinks apply for each.
//!
//! # Examples
//!
//! ```
//! use mockbox_shell::theme::{ThemeMode, ResolvedTheme};
//!
//! let mode: ThemeMode = "system".parse().unwrap();
//! assert_eq!(mode, ThemeMode::System);
//! assert_eq!(ThemeMode::Dark.explicit(), Some(ResolvedTheme::Dark));
//! ```

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::InvalidModeError;

/// The user's explicit theme choice. `System` defers to the OS preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// All modes in picker order.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// The literal persisted for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Human label used by theme pickers.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    /// The concrete theme this mode pins, or `None` for `System`.
    pub fn explicit(self) -> Option<ResolvedTheme> {
        match self {
            ThemeMode::Light => Some(ResolvedTheme::Light),
            ThemeMode::Dark => Some(ResolvedTheme::Dark),
            ThemeMode::System => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(InvalidModeError(other.to_string())),
        }
    }
}

/// The theme actually rendered. Always concrete.
///
/// Defaults to `Dark`, the value rendered before the first resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    #[default]
    Dark,
}

impl ResolvedTheme {
    /// Maps the OS "prefers dark" signal onto a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    /// Name of the root-level marker that represents this theme.
    pub fn class_name(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ResolvedTheme::Dark
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Colour palette for one resolved theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Background colors
    pub panel_background: Color32,
    pub extreme_background: Color32,
    pub sidebar_background: Color32,

    // Foreground colors
    pub text: Color32,
    pub text_dim: Color32,

    // Interactive colors
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Accents (line loader gradient, links)
    pub accent_start: Color32,
    pub accent_end: Color32,
    pub error: Color32,
    pub warning: Color32,
}

impl ThemeColors {
    /// Returns the palette for a resolved theme.
    pub fn for_theme(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Light => light_palette(),
            ResolvedTheme::Dark => dark_palette(),
        }
    }
}

/// Builds egui visuals for a resolved theme with the palette applied.
pub fn visuals_for(theme: ResolvedTheme) -> egui::Visuals {
    let mut visuals = if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    apply_palette(&ThemeColors::for_theme(theme), &mut visuals);
    visuals
}

/// Applies a palette's colors to egui visuals
pub fn apply_palette(colors: &ThemeColors, visuals: &mut egui::Visuals) {
    visuals.panel_fill = colors.panel_background;
    visuals.window_fill = colors.panel_background;
    visuals.extreme_bg_color = colors.extreme_background;
    visuals.faint_bg_color = colors.hover;

    visuals.override_text_color = Some(colors.text);

    visuals.selection.bg_fill = colors.selection;
    visuals.selection.stroke.color = colors.accent_start;

    visuals.widgets.noninteractive.bg_fill = colors.panel_background;
    visuals.widgets.noninteractive.bg_stroke.color = colors.border;
    visuals.widgets.inactive.bg_fill = colors.hover;
    visuals.widgets.hovered.bg_fill = colors.hover;
    visuals.widgets.active.bg_fill = colors.selection;

    visuals.hyperlink_color = colors.accent_start;
    visuals.error_fg_color = colors.error;
    visuals.warn_fg_color = colors.warning;
}

// Slate-based light palette
fn light_palette() -> ThemeColors {
    ThemeColors {
        panel_background: hex_to_color32("#f8fafc"),
        extreme_background: hex_to_color32("#ffffff"),
        sidebar_background: hex_to_color32("#f1f5f9"),

        text: hex_to_color32("#0f172a"),
        text_dim: hex_to_color32("#475569"),

        selection: hex_to_color32("#e2e8f0"),
        hover: hex_to_color32("#f1f5f9"),
        border: hex_to_color32("#cbd5e1"),

        accent_start: hex_to_color32("#3b82f6"), // blue-500
        accent_end: hex_to_color32("#9333ea"),   // purple-600
        error: hex_to_color32("#dc2626"),
        warning: hex_to_color32("#d97706"),
    }
}

// Gray-900 based dark palette
fn dark_palette() -> ThemeColors {
    ThemeColors {
        panel_background: hex_to_color32("#111827"),
        extreme_background: hex_to_color32("#030712"),
        sidebar_background: hex_to_color32("#0b1120"),

        text: hex_to_color32("#f9fafb"),
        text_dim: hex_to_color32("#9ca3af"),

        selection: hex_to_color32("#1f2937"),
        hover: hex_to_color32("#1f2937"),
        border: hex_to_color32("#374151"),

        accent_start: hex_to_color32("#3b82f6"),
        accent_end: hex_to_color32("#9333ea"),
        error: hex_to_color32("#f87171"),
        warning: hex_to_color32("#fbbf24"),
    }
}

/// Converts a hex color string (like "#3b82f6") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}
