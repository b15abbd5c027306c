//! Header panel UI rendering
//!
//! Handles the top bar with the current page title and the theme picker.

use eframe::egui;
use egui::RichText;
use mockbox_shell::{ResolvedTheme, ThemeMode};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a theme mode
    ThemeModeSelected(ThemeMode),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `title` - Title of the page being displayed
/// * `mode` - The selected theme mode
/// * `resolved` - The theme currently rendered
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(
    ui: &mut egui::Ui,
    title: &str,
    mode: ThemeMode,
    resolved: ResolvedTheme,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(title).heading());

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut selected = mode;
            let icon = match mode {
                ThemeMode::Light => "☀",
                ThemeMode::Dark => "🌙",
                ThemeMode::System => "🖥",
            };

            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(format!("{} {}", icon, mode.label()))
                .show_ui(ui, |ui| {
                    for option in ThemeMode::ALL {
                        ui.selectable_value(&mut selected, option, option.label());
                    }
                })
                .response
                .on_hover_text(format!("Rendering {} theme", resolved));

            if selected != mode {
                interaction = Some(HeaderInteraction::ThemeModeSelected(selected));
            }

            ui.label("Theme:");
        });
    });

    interaction
}
