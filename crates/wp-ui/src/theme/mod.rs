use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;
use wp_core::state::ThemeSettings;

/// Apply the dashboard theme
pub fn apply_theme(ctx: &Context, theme: &ThemeSettings) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    if theme.dark_mode {
        let bg_color = Color32::from_rgb(23, 23, 23);
        let panel_bg = Color32::from_rgb(31, 31, 31);
        let widget_bg = Color32::from_rgb(40, 40, 40);
        let text_color = Color32::from_rgb(220, 220, 220);

        visuals.window_fill = panel_bg;
        visuals.panel_fill = panel_bg;
        visuals.extreme_bg_color = bg_color;
        visuals.faint_bg_color = widget_bg;

        visuals.widgets.noninteractive.bg_fill = widget_bg;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
        visuals.widgets.inactive.bg_fill = widget_bg;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
        visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 50, 50);
        visuals.widgets.active.bg_fill = Color32::from_rgb(60, 60, 60);
        visuals.code_bg_color = Color32::from_rgb(35, 35, 35);
    }

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

/// Get the warning color for the theme
pub fn warning_color() -> Color32 {
    Color32::from_rgb(230, 180, 80)
}
