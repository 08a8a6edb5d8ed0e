//! Main application entry point

use std::sync::Arc;
use eframe::egui::{self, Context};
use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wp_core::events::EventBus;
use wp_core::state::ThemeSettings;
use wp_core::{DashboardConfig, FilterController};
use wp_data::HttpSource;
use wp_ui::{FilterPanel, LoadStatus};
use wp_views::{MetricsPanel, ViewerContext, Viewport};

mod event_log;
mod loader;

use event_log::subscribe_logging;
use loader::{load_into, LoadState};

/// Main application state
struct PopulationDashboardApp {
    /// The viewport managing all docked views
    viewport: Viewport,

    /// Viewer context shared between all views
    viewer_context: ViewerContext,

    /// Filter sidebar
    filter_panel: FilterPanel,

    /// Written by the load task
    load_state: LoadState,

    /// Current theme
    theme: ThemeSettings,

    /// Keeps the load task alive
    _runtime: tokio::runtime::Runtime,
}

impl PopulationDashboardApp {
    fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime, config: DashboardConfig) -> Self {
        wp_ui::apply_theme(&cc.egui_ctx, &config.theme);

        let event_bus = Arc::new(EventBus::new());
        subscribe_logging(&event_bus);

        let filter = Arc::new(FilterController::new(event_bus.clone()));
        let load_state = LoadState::new();

        let source = Arc::new(HttpSource::new(config.source_url.clone()));
        let ctx = cc.egui_ctx.clone();
        let task_state = load_state.clone();
        let task_filter = filter.clone();
        let preferred_year = config.preferred_year;
        runtime.spawn(async move {
            load_into(source, task_state, task_filter, event_bus, preferred_year).await;
            ctx.request_repaint();
        });

        let theme = config.theme.clone();
        Self {
            viewport: Viewport::dashboard(),
            viewer_context: ViewerContext::new(filter.clone(), config),
            filter_panel: FilterPanel::new(filter),
            load_state,
            theme,
            _runtime: runtime,
        }
    }

    fn handle_shortcuts(&self, ctx: &Context) {
        if ctx.memory(|m| m.focus().is_some()) {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            let mut time_control = self.viewer_context.time_control.write();
            time_control.playing = !time_control.playing;
        }
    }

    fn dashboard(&mut self, ui: &mut egui::Ui) {
        let Some(dataset) = self.load_state.dataset() else {
            wp_ui::loading_screen(ui, &self.load_state.status());
            return;
        };

        if let Err(e) = self.viewer_context.refresh(&dataset.frames) {
            error!("Failed to build dashboard: {}", e);
            self.load_state.fail(e.to_string());
            return;
        }

        if let Some(model) = self.viewer_context.model() {
            MetricsPanel::ui(ui, &model.metrics);
        }
        ui.separator();
        self.viewport.ui(ui, &self.viewer_context);
    }
}

impl eframe::App for PopulationDashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if wp_ui::header(ctx, &self.theme) {
            self.theme.dark_mode = !self.theme.dark_mode;
            wp_ui::apply_theme(ctx, &self.theme);
        }

        let status = self.load_state.status();
        wp_ui::status_bar(ctx, &status);

        if status.is_ready() {
            self.handle_shortcuts(ctx);
            egui::SidePanel::left("filters")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| self.filter_panel.ui(ui));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match &status {
            LoadStatus::Failed { message } => wp_ui::error_screen(ui, message),
            _ => self.dashboard(ui),
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting world population dashboard");

    let config = DashboardConfig::default();
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: if config.theme.dark_mode { eframe::Theme::Dark } else { eframe::Theme::Light },
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard População Mundial",
        options,
        Box::new(move |cc| Box::new(PopulationDashboardApp::new(cc, runtime, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
