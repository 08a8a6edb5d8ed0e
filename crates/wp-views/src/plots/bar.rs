//! Ranking of the most populous countries of a year

use std::any::Any;
use egui::{Align2, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};
use wp_core::columns::{COUNTRY, POPULATION};
use wp_core::FilterState;
use wp_data::metrics::format_population;
use wp_data::{DataError, PopulationFrames};

use super::utils::{categorical_color, chart_header, show_notice, waiting_for_data};
use crate::spec::{BarChartSpec, BarEntry, CategoryOrder, Notice, ViewOutput};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// The `top_n` most populous rows of the selected year
///
/// Bars are stored largest first; rows with equal population keep their
/// table order.
pub fn build_top_population_bar(
    frames: &PopulationFrames,
    filter: &FilterState,
    top_n: usize,
) -> Result<ViewOutput<BarChartSpec>, DataError> {
    let year = filter.selected_year;
    let rows = frames.countries_no_world().where_year(year)?;

    if rows.is_empty() {
        return Ok(ViewOutput::Notice(Notice::warning(format!(
            "Nenhum dado encontrado para o ano de {}.",
            year
        ))));
    }

    let mut order: Vec<usize> = (0..rows.num_rows()).collect();
    order.sort_by(|a, b| rows.population(*b).total_cmp(&rows.population(*a)));
    order.truncate(top_n);

    let bars = order
        .into_iter()
        .map(|row| BarEntry {
            country: rows.country(row).to_string(),
            population: rows.population(row),
        })
        .collect();

    Ok(ViewOutput::Chart(BarChartSpec {
        title: format!("Top {} regiões econômicas mais populosas - {}", top_n, year),
        value_label: POPULATION.to_string(),
        category_label: COUNTRY.to_string(),
        bars,
        category_order: CategoryOrder::TotalAscending,
    }))
}

/// Horizontal bar chart view
pub struct TopPopulationView {
    id: SpaceViewId,
    title: String,
    bar_width: f64,
}

impl TopPopulationView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Mais populosos".to_string(),
            bar_width: 0.7,
        }
    }

    fn plot(&self, ui: &mut Ui, spec: &BarChartSpec) {
        chart_header(ui, &spec.title, spec);

        let ordered = spec.axis_order();
        let color = categorical_color(0);
        let bars: Vec<Bar> = ordered
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Bar::new(i as f64, entry.population)
                    .width(self.bar_width)
                    .name(&entry.country)
                    .fill(color)
            })
            .collect();

        Plot::new(format!("top_{:?}", self.id))
            .x_axis_label(spec.value_label.as_str())
            .y_axis_label(spec.category_label.as_str())
            .allow_scroll(false)
            .allow_drag(false)
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{}\n{}", name, format_population(value.x))
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().color(color));

                for (i, entry) in ordered.iter().enumerate() {
                    plot_ui.text(
                        Text::new(PlotPoint::new(0.0, i as f64), format!(" {}", entry.country))
                            .anchor(Align2::LEFT_CENTER),
                    );
                }
            });
    }
}

impl SpaceView for TopPopulationView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "TopPopulationView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        match &model.top_countries {
            ViewOutput::Chart(spec) => self.plot(ui, spec),
            ViewOutput::Notice(notice) => show_notice(ui, notice),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
