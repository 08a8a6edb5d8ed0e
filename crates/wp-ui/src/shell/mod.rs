//! Frame around the dashboard: header, status bar and the full-screen
//! loading and error states

use egui::{Align, Context, Layout, RichText, TopBottomPanel, Ui};
use std::time::{Duration, Instant};
use wp_core::state::{ThemeSettings, DATASET_PAGE_URL};

use crate::icons;
use crate::theme::{error_color, warning_color};

/// Progress of the one load a session performs
#[derive(Debug, Clone)]
pub enum LoadStatus {
    Loading { started: Instant },
    Ready { summary: String },
    Failed { message: String },
}

impl LoadStatus {
    pub fn loading() -> Self {
        Self::Loading { started: Instant::now() }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Time spent loading so far, `None` once the load has finished
    pub fn waiting_for(&self) -> Option<Duration> {
        match self {
            Self::Loading { started } => Some(started.elapsed()),
            _ => None,
        }
    }

    /// Text for the status bar
    pub fn status_text(&self) -> String {
        match self {
            Self::Loading { started } => {
                format!("Carregando dados... ({}s)", started.elapsed().as_secs())
            }
            Self::Ready { summary } => summary.clone(),
            Self::Failed { .. } => "Falha ao carregar os dados".to_string(),
        }
    }
}

/// Title and attribution; returns true when the theme toggle was clicked
pub fn header(ctx: &Context, theme: &ThemeSettings) -> bool {
    let mut toggled = false;
    TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading(format!("{} Dashboard de População Mundial", icons::GLOBE));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let (icon, tooltip) = if theme.dark_mode {
                    (icons::THEME_LIGHT, "Tema claro")
                } else {
                    (icons::THEME_DARK, "Tema escuro")
                };
                toggled = crate::icon_button(ui, icon, tooltip).clicked();
            });
        });
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label("Dados fornecidos pelo");
            ui.hyperlink_to("DataHub", DATASET_PAGE_URL);
            ui.label("com base no Banco Mundial.");
        });
        ui.add_space(4.0);
    });
    toggled
}

/// One-line status at the bottom of the window
pub fn status_bar(ctx: &Context, status: &LoadStatus) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if status.waiting_for().is_some() {
                ui.spinner();
            }
            let text = RichText::new(status.status_text()).small();
            match status {
                LoadStatus::Failed { .. } => ui.label(text.color(error_color())),
                _ => ui.label(text),
            };
        });
    });
}

/// Spinner shown while the dataset downloads
pub fn loading_screen(ui: &mut Ui, status: &LoadStatus) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.spinner();
        ui.add_space(12.0);
        ui.heading("Carregando dados de população...");
        if let Some(waited) = status.waiting_for() {
            if waited > Duration::from_secs(10) {
                ui.label(
                    RichText::new("O download está demorando mais que o esperado.")
                        .color(warning_color()),
                );
            }
        }
    });
}

/// Shown instead of the dashboard when the load failed
pub fn error_screen(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        egui::Frame::none()
            .fill(error_color().linear_multiply(0.2))
            .stroke(egui::Stroke::new(1.0, error_color()))
            .rounding(4.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("{} Não foi possível carregar os dados", icons::WARNING))
                        .color(error_color())
                        .strong(),
                );
                ui.add_space(6.0);
                ui.label(message);
            });
        ui.add_space(12.0);
        ui.label(RichText::new("Reinicie o aplicativo para tentar novamente.").weak());
    });
}
