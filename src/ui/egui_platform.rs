//! egui-backed collaborators for the coordinators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use eframe::egui;
use mockbox_shell::platform::BroadcastThemeSignal;
use mockbox_shell::theme::visuals_for;
use mockbox_shell::{ResolvedTheme, Router, ThemeSink};

/// Applies the resolved theme to the egui context.
///
/// The transition marker zeroes the animation time so widgets snap to the new
/// palette instead of fading through intermediate colours.
pub struct EguiThemeSink {
    ctx: egui::Context,
    saved_animation_time: Option<f32>,
}

impl EguiThemeSink {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            saved_animation_time: None,
        }
    }
}

impl ThemeSink for EguiThemeSink {
    fn apply_theme_class(&mut self, theme: ResolvedTheme) {
        let egui_theme = match theme {
            ResolvedTheme::Light => egui::Theme::Light,
            ResolvedTheme::Dark => egui::Theme::Dark,
        };
        self.ctx.set_theme(egui_theme);
        self.ctx.set_visuals(visuals_for(theme));
        self.ctx.request_repaint();
    }

    fn begin_transition_marker(&mut self) {
        if self.saved_animation_time.is_none() {
            self.saved_animation_time = Some(self.ctx.style().animation_time);
            self.ctx.style_mut(|style| style.animation_time = 0.0);
        }
    }

    fn end_transition_marker(&mut self) {
        if let Some(animation_time) = self.saved_animation_time.take() {
            self.ctx.style_mut(|style| style.animation_time = animation_time);
        }
    }
}

/// In-process router: pushed locations become displayed on the next frame.
#[derive(Debug, Clone, Default)]
pub struct ShellRouter {
    pending: Rc<RefCell<VecDeque<String>>>,
}

impl ShellRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next location to display, in push order.
    pub fn take_next(&self) -> Option<String> {
        self.pending.borrow_mut().pop_front()
    }
}

impl Router for ShellRouter {
    fn push(&mut self, path: &str) {
        self.pending.borrow_mut().push_back(path.to_string());
    }
}

/// Forwards the OS theme egui reports this frame into the signal hub.
pub fn observe_system_theme(ctx: &egui::Context, signal: &BroadcastThemeSignal) {
    if let Some(theme) = ctx.input(|i| i.raw.system_theme) {
        signal.set_prefers_dark(theme == egui::Theme::Dark);
    }
}
