//! Utilities shared by the chart views

pub mod colors;

pub use colors::{categorical_color, normalize, plasma_color, scale_color};

use egui::{RichText, Ui};
use serde::Serialize;

use crate::export;
use crate::spec::{Notice, NoticeLevel};

/// Draw a notice in place of a chart
pub fn show_notice(ui: &mut Ui, notice: &Notice) {
    let (icon, color) = match notice.level {
        NoticeLevel::Warning => ("⚠", ui.visuals().warn_fg_color),
        NoticeLevel::Info => ("ℹ", ui.visuals().hyperlink_color),
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(format!("{} {}", icon, notice.message)).color(color));
    });
}

/// Shown by every view until the first model is built
pub fn waiting_for_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new("Aguardando dados...").weak());
    });
}

/// Chart title with the "copy specification" action
pub fn chart_header<T: Serialize>(ui: &mut Ui, title: &str, spec: &T) {
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            export::copy_spec_button(ui, spec);
        });
    });
}
