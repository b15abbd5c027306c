//! Desktop shell UI
//!
//! This module contains the egui rendering and platform glue for the shell:
//! - Platform glue (egui-backed theme sink, in-process router, OS theme observation)
//! - Sidebar (navigation sections, collapse toggle)
//! - Header (page title, theme picker)
//! - Line loader (navigation progress indicator)
//! - Panel manager (panel orchestration and layout)

pub mod egui_platform;
pub mod sidebar;
pub mod header;
pub mod line_loader;
pub mod panel_manager;
