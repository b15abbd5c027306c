//! Sidebar UI rendering
//!
//! Handles the left navigation panel with its three link sections and the
//! collapse toggle.

use eframe::egui;
use egui::RichText;
use mockbox_shell::ThemeColors;

/// A navigable page of the shell.
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

/// A titled group of sidebar links.
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

pub const NAV_SECTIONS: &[NavSection] = &[
    NavSection {
        title: "Navigation",
        items: &[
            NavItem { title: "Dashboard", href: "/dashboard", icon: "🏠" },
            NavItem { title: "My Mocks", href: "/mocks", icon: "🗄" },
            NavItem { title: "Create New", href: "/builder", icon: "➕" },
            NavItem { title: "Templates", href: "/templates", icon: "📄" },
            NavItem { title: "Analytics", href: "/analytics", icon: "📊" },
        ],
    },
    NavSection {
        title: "Tools",
        items: &[
            NavItem { title: "API Testing", href: "/testing", icon: "⚡" },
            NavItem { title: "Share & Export", href: "/share", icon: "🔗" },
            NavItem { title: "Monitoring", href: "/monitoring", icon: "📈" },
        ],
    },
    NavSection {
        title: "Account",
        items: &[
            NavItem { title: "Settings", href: "/settings", icon: "⚙" },
            NavItem { title: "Account", href: "/account", icon: "👤" },
        ],
    },
];

/// Looks up the sidebar entry for a path.
pub fn find_item(path: &str) -> Option<&'static NavItem> {
    NAV_SECTIONS
        .iter()
        .flat_map(|section| section.items.iter())
        .find(|item| item.href == path)
}

/// Result of user interaction with the sidebar
pub enum SidebarInteraction {
    /// User clicked a link
    Navigate(&'static str),
    /// User toggled the collapsed state
    CollapseToggled,
}

/// Renders the sidebar links and collapse toggle
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `active_path` - Location currently displayed, highlighted in the list
/// * `collapsed` - Whether only icons are shown
/// * `colors` - Palette of the resolved theme
pub fn render_sidebar(
    ui: &mut egui::Ui,
    active_path: &str,
    collapsed: bool,
    colors: &ThemeColors,
) -> Option<SidebarInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if !collapsed {
            ui.label(RichText::new("Mockbox").strong().size(18.0));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let toggle = if collapsed { "⏵" } else { "⏴" };
            if ui.small_button(toggle).clicked() {
                interaction = Some(SidebarInteraction::CollapseToggled);
            }
        });
    });
    ui.separator();

    for section in NAV_SECTIONS {
        if !collapsed {
            ui.add_space(6.0);
            ui.label(RichText::new(section.title.to_uppercase()).small().color(colors.text_dim));
        }

        for item in section.items {
            let is_active = item.href == active_path;
            let text = if collapsed {
                item.icon.to_string()
            } else {
                format!("{}  {}", item.icon, item.title)
            };

            let response = ui.selectable_label(is_active, text);
            let response = if collapsed {
                response.on_hover_text(item.title)
            } else {
                response
            };

            if response.clicked() {
                interaction = Some(SidebarInteraction::Navigate(item.href));
            }
        }
    }

    interaction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_item_by_href() {
        assert_eq!(find_item("/mocks").map(|item| item.title), Some("My Mocks"));
        assert!(find_item("/nowhere").is_none());
    }

    #[test]
    fn test_hrefs_are_unique() {
        let mut hrefs: Vec<&str> = NAV_SECTIONS
            .iter()
            .flat_map(|section| section.items.iter().map(|item| item.href))
            .collect();
        let total = hrefs.len();
        hrefs.sort();
        hrefs.dedup();
        assert_eq!(hrefs.len(), total);
    }
}
