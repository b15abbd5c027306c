//! Navigation progress line
//!
//! Draws a thin gradient bar across the top of the window while a navigation
//! is in flight. The bar grows from the left over `SWEEP_SECONDS`.

use eframe::egui;
use egui::{Color32, Mesh, Pos2, Rect};
use mockbox_shell::ThemeColors;

const SWEEP_SECONDS: f64 = 0.8;
const HEIGHT: f32 = 3.0;

/// Animation state of the progress line.
#[derive(Debug, Default)]
pub struct LineLoader {
    /// egui time at which the current sweep started
    started_at: Option<f64>,
}

impl LineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the bar when `is_navigating`, resetting the sweep when it stops.
    pub fn render(&mut self, ctx: &egui::Context, is_navigating: bool, colors: &ThemeColors) {
        if !is_navigating {
            self.started_at = None;
            return;
        }

        let now = ctx.input(|i| i.time);
        let started_at = *self.started_at.get_or_insert(now);
        let progress = sweep_progress(now - started_at);

        let screen = ctx.content_rect();
        let rect = Rect::from_min_max(
            screen.left_top(),
            Pos2::new(screen.left() + screen.width() * progress, screen.top() + HEIGHT),
        );

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("line_loader"),
        ));
        painter.add(gradient_mesh(rect, colors.accent_start, colors.accent_end));

        if progress < 1.0 {
            ctx.request_repaint();
        }
    }
}

/// Fraction of the width covered after `elapsed` seconds, eased.
fn sweep_progress(elapsed: f64) -> f32 {
    let t = (elapsed / SWEEP_SECONDS).clamp(0.0, 1.0);
    // ease-out cubic
    (1.0 - (1.0 - t).powi(3)) as f32
}

fn gradient_mesh(rect: Rect, left: Color32, right: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), left);
    mesh.colored_vertex(rect.right_top(), right);
    mesh.colored_vertex(rect.right_bottom(), right);
    mesh.colored_vertex(rect.left_bottom(), left);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}
