//! Raw data table and column descriptions

use std::any::Any;
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use wp_core::COLUMN_METADATA;
use wp_data::metrics::format_population;
use wp_data::{PopulationFrames, PopulationTable};

use crate::plots::utils::{show_notice, waiting_for_data};
use crate::spec::{Notice, ViewOutput};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// The country table without "World", or a notice when it is empty
pub fn build_raw_table(frames: &PopulationFrames) -> ViewOutput<PopulationTable> {
    let table = frames.countries_no_world();
    if table.is_empty() {
        ViewOutput::Notice(Notice::info("Nenhum dado disponível para exibir."))
    } else {
        ViewOutput::Chart(table.clone())
    }
}

/// Configuration for the raw table
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub show_row_numbers: bool,
    pub striped_rows: bool,
    pub resizable_columns: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            striped_rows: true,
            resizable_columns: true,
        }
    }
}

/// Column descriptions and an expandable passthrough of the data
pub struct RawDataView {
    id: SpaceViewId,
    title: String,
    pub config: TableConfig,
}

impl RawDataView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Dados".to_string(),
            config: TableConfig::default(),
        }
    }

    fn column_descriptions(&self, ui: &mut Ui) {
        egui::Grid::new(("column_descriptions", self.id))
            .striped(true)
            .num_columns(2)
            .show(ui, |ui| {
                for (column, description) in COLUMN_METADATA.iter() {
                    ui.strong(column);
                    ui.label(description);
                    ui.end_row();
                }
            });
    }

    fn render_table(&self, ui: &mut Ui, table: &PopulationTable) {
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .resizable(self.config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(360.0)
            .vscroll(true);

        if self.config.show_row_numbers {
            builder = builder.column(Column::initial(50.0).at_least(40.0));
        }
        builder = builder
            .column(Column::initial(220.0).at_least(80.0).clip(true))
            .column(Column::initial(90.0).at_least(60.0))
            .column(Column::initial(60.0).at_least(50.0))
            .column(Column::remainder().at_least(100.0));

        builder
            .header(20.0, |mut header| {
                if self.config.show_row_numbers {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                }
                for (column, description) in COLUMN_METADATA.iter() {
                    header.col(|ui| {
                        ui.strong(column).on_hover_text(description);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, table.num_rows(), |row_index, mut row| {
                    if self.config.show_row_numbers {
                        row.col(|ui| {
                            ui.label(row_index.to_string());
                        });
                    }
                    row.col(|ui| {
                        ui.label(table.country(row_index));
                    });
                    row.col(|ui| {
                        ui.label(table.iso_code(row_index).unwrap_or(""));
                    });
                    row.col(|ui| {
                        ui.label(table.year(row_index).to_string());
                    });
                    row.col(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.monospace(format_population(table.population(row_index)));
                        });
                    });
                });
            });
    }
}

impl SpaceView for RawDataView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "RawDataView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ui.heading("ℹ️ Descrição das colunas");
        self.column_descriptions(ui);
        ui.separator();

        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        egui::CollapsingHeader::new("📄 Ver dados brutos")
            .id_source(("raw_data", self.id))
            .default_open(false)
            .show(ui, |ui| match &model.raw_table {
                ViewOutput::Chart(table) => {
                    ui.label(format!("{} linhas", table.num_rows()));
                    self.render_table(ui, table);
                }
                ViewOutput::Notice(notice) => show_notice(ui, notice),
            });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
