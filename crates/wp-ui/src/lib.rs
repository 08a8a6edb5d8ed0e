//! User interface components for the population dashboard
//!
//! This crate provides the egui chrome around the charts: theme, header,
//! status bar, loading and error screens, and the filter sidebar.

pub mod filter_panel;
pub mod shell;
pub mod theme;

/// Re-export commonly used types
pub use filter_panel::FilterPanel;
pub use shell::{error_screen, header, loading_screen, status_bar, LoadStatus};
pub use theme::apply_theme;

// Widget creation helpers
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> egui::Response {
    ui.add(egui::Button::new(icon)).on_hover_text(tooltip)
}

// Common icon definitions
pub mod icons {
    pub const GLOBE: &str = "🌍";
    pub const FILTER: &str = "🔍";
    pub const THEME_DARK: &str = "🌙";
    pub const THEME_LIGHT: &str = "☀";
    pub const WARNING: &str = "⚠";
}
