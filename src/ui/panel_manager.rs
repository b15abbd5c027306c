//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (sidebar, header, page body) and the progress
//! line, and funnels their interactions back to the application.

use eframe::egui;
use egui::RichText;
use mockbox_shell::{NavigationCoordinator, ThemeColors, ThemePreferenceEngine, ThemeMode};

use crate::ui::line_loader::LineLoader;
use crate::ui::{header, sidebar};

/// Result of panel interactions that need to be handled by the application.
pub enum PanelInteraction {
    /// A link to `path` was clicked
    NavigateRequested(&'static str),
    /// A theme mode was picked
    ThemeModeSelected(ThemeMode),
    /// The sidebar collapse toggle was clicked
    SidebarCollapseToggled,
}

/// Read-only view of the shell the panels render from.
pub struct ShellView<'a> {
    pub theme: &'a ThemePreferenceEngine,
    pub navigation: &'a NavigationCoordinator,
    pub sidebar_collapsed: bool,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        view: &ShellView<'_>,
        line_loader: &mut LineLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        let colors = ThemeColors::for_theme(view.theme.resolved());
        let active_path = view.navigation.current_path();
        let title = sidebar::find_item(active_path)
            .map(|item| item.title)
            .unwrap_or("Mockbox");

        let sidebar_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(colors.sidebar_background);

        egui::SidePanel::left("sidebar")
            .exact_width(if view.sidebar_collapsed { 56.0 } else { 220.0 })
            .resizable(false)
            .frame(sidebar_frame)
            .show(ctx, |ui| {
                match sidebar::render_sidebar(ui, active_path, view.sidebar_collapsed, &colors) {
                    Some(sidebar::SidebarInteraction::Navigate(path)) => {
                        interaction = Some(PanelInteraction::NavigateRequested(path));
                    }
                    Some(sidebar::SidebarInteraction::CollapseToggled) => {
                        interaction = Some(PanelInteraction::SidebarCollapseToggled);
                    }
                    None => {}
                }
            });

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header::HeaderInteraction::ThemeModeSelected(mode)) =
                header::render_header(ui, title, view.theme.mode(), view.theme.resolved())
            {
                interaction = Some(PanelInteraction::ThemeModeSelected(mode));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.label(RichText::new(title).size(24.0).strong());
            ui.label(RichText::new(active_path).monospace().color(colors.text_dim));
            ui.add_space(8.0);

            if let Some(target) = view.navigation.target_path() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Opening {}", target));
                });
            }
        });

        line_loader.render(ctx, view.navigation.is_navigating(), &colors);

        interaction
    }
}
