//! Mockbox Shell Desktop Application
//!
//! This module provides the desktop shell of the Mockbox mock API builder using the egui framework.
//! The shell features:
//! - Sidebar navigation with a progress line while a page transition is in flight
//! - Light, dark and system themes with the choice persisted across sessions
//! - Live tracking of the OS color scheme while the system theme is selected
//!
//! The application is built with a modular architecture:
//! - `mockbox_shell::app` - Theme engine, navigation coordinator, settings persistence
//! - `mockbox_shell::platform` - File-backed store and signal hub
//! - `ui/` - Panel rendering and egui platform glue

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use eframe::egui;
use mockbox_shell::platform::{BroadcastThemeSignal, FileStore, MemoryStore, SystemClock};
use mockbox_shell::{
    Clock, NavigationCoordinator, PreferenceStore, SettingsCoordinator, ShellConfig,
    ThemePreferenceEngine,
};

mod ui;

use ui::egui_platform::{observe_system_theme, EguiThemeSink, ShellRouter};
use ui::line_loader::LineLoader;
use ui::panel_manager::{PanelInteraction, PanelManager, ShellView};

const SIDEBAR_COLLAPSED_KEY: &str = "sidebar_collapsed";

/// Main application entry point that initializes logging and launches the shell.
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_module("egui", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    // Optional JSON config file as the first argument
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ShellConfig::load(&path).unwrap_or_else(|err| {
            log::warn!("{:#}, using defaults", err);
            ShellConfig::default()
        }),
        None => ShellConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Mockbox"),
        ..Default::default()
    };

    eframe::run_native(
        "Mockbox",
        options,
        Box::new(move |cc| Ok(Box::new(MockboxShellApp::new(cc, &config)))),
    )
}

/// Opens the preference file, or an in-memory store when the platform has no
/// config directory.
fn open_store() -> Box<dyn PreferenceStore> {
    match FileStore::open_default() {
        Some(store) => {
            log::info!("Preferences at {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("No config directory available, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// The Mockbox desktop shell.
///
/// Delegates to the coordinators:
/// - `ThemePreferenceEngine` owns the rendered theme
/// - `NavigationCoordinator` owns the in-flight navigation flag
/// - `PanelManager` renders the panels and reports interactions
struct MockboxShellApp {
    theme: ThemePreferenceEngine,
    navigation: NavigationCoordinator,
    /// OS theme hub fed from egui's raw input every frame
    system_theme: BroadcastThemeSignal,
    router: ShellRouter,
    settings: Box<dyn PreferenceStore>,
    clock: Rc<SystemClock>,
    line_loader: LineLoader,
    sidebar_collapsed: bool,
}

impl MockboxShellApp {
    /// Creates the shell, loading the theme and layout from persistent storage.
    fn new(cc: &eframe::CreationContext, config: &ShellConfig) -> Self {
        let clock = Rc::new(SystemClock::new());
        let system_theme = BroadcastThemeSignal::unavailable();
        let router = ShellRouter::new();

        let mut theme = ThemePreferenceEngine::new(
            open_store(),
            Box::new(system_theme.clone()),
            Box::new(EguiThemeSink::new(cc.egui_ctx.clone())),
            clock.clone(),
            &config.theme,
        );
        theme.initialize();
        // Seed the hub before mounting so the first resolution uses the real OS value
        observe_system_theme(&cc.egui_ctx, &system_theme);
        theme.mount();

        let navigation = NavigationCoordinator::new(Box::new(router.clone()), clock.clone(), &config.navigation);

        let settings = open_store();
        let sidebar_collapsed: bool =
            SettingsCoordinator::load_setting(Some(&*settings), SIDEBAR_COLLAPSED_KEY);

        Self {
            theme,
            navigation,
            system_theme,
            router,
            settings,
            clock,
            line_loader: LineLoader::new(),
            sidebar_collapsed,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        match interaction {
            PanelInteraction::NavigateRequested(path) => {
                self.navigation.request_navigate(path);
            }
            PanelInteraction::ThemeModeSelected(mode) => {
                self.theme.set_mode(mode);
            }
            PanelInteraction::SidebarCollapseToggled => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                SettingsCoordinator::save_setting(
                    &mut *self.settings,
                    SIDEBAR_COLLAPSED_KEY,
                    &self.sidebar_collapsed,
                );
            }
        }
    }

    /// Schedules a repaint for the earliest coordinator deadline.
    fn request_repaint_for_deadlines(&self, ctx: &egui::Context) {
        let next = [self.theme.next_deadline(), self.navigation.next_deadline()]
            .into_iter()
            .flatten()
            .min();

        if let Some(due) = next {
            let wait = due.saturating_sub(self.clock.now());
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }
}

impl eframe::App for MockboxShellApp {
    /// Main update loop.
    ///
    /// 1. Feed the OS theme into the signal hub and deliver pending changes
    /// 2. Fire due transition/settle timers
    /// 3. Display locations the router was asked to show
    /// 4. Render all panels via PanelManager and handle interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        observe_system_theme(ctx, &self.system_theme);
        self.theme.poll();
        self.navigation.poll();

        while let Some(path) = self.router.take_next() {
            self.navigation.on_location_settled(&path);
        }

        let view = ShellView {
            theme: &self.theme,
            navigation: &self.navigation,
            sidebar_collapsed: self.sidebar_collapsed,
        };
        if let Some(interaction) = PanelManager::render_all_panels(ctx, &view, &mut self.line_loader) {
            self.handle_panel_interaction(interaction);
        }

        self.request_repaint_for_deadlines(ctx);
    }
}
