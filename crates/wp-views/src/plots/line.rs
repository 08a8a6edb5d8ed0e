//! Population trend of the selected country

use std::any::Any;
use egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use wp_core::columns::{POPULATION, YEAR};
use wp_core::FilterState;
use wp_data::metrics::format_population;
use wp_data::{DataError, PopulationFrames};

use super::utils::{categorical_color, chart_header, show_notice, waiting_for_data};
use crate::spec::{LineChartSpec, Notice, ViewOutput};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Yearly population of the selected country, aggregates and "World" excluded
pub fn build_trend_line(
    frames: &PopulationFrames,
    filter: &FilterState,
) -> Result<ViewOutput<LineChartSpec>, DataError> {
    let country = &filter.selected_country;
    let rows = frames.countries_no_world().where_country(country)?;

    if rows.is_empty() {
        return Ok(ViewOutput::Notice(Notice::warning(format!(
            "Nenhum dado encontrado para {}.",
            country
        ))));
    }

    let mut points: Vec<(i64, f64)> = (0..rows.num_rows())
        .map(|row| (rows.year(row), rows.population(row)))
        .collect();
    points.sort_by_key(|(year, _)| *year);

    Ok(ViewOutput::Chart(LineChartSpec {
        title: format!("Evolução da População - {}", country),
        x_label: YEAR.to_string(),
        y_label: POPULATION.to_string(),
        points,
    }))
}

/// Line plot view
pub struct TrendLineView {
    id: SpaceViewId,
    title: String,
    line_width: f32,
    show_points: bool,
}

impl TrendLineView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Evolução".to_string(),
            line_width: 2.0,
            show_points: false,
        }
    }

    fn plot(&mut self, ui: &mut Ui, spec: &LineChartSpec) {
        chart_header(ui, &spec.title, spec);
        ui.checkbox(&mut self.show_points, "Mostrar pontos");

        let points: Vec<[f64; 2]> = spec
            .points
            .iter()
            .map(|(year, population)| [*year as f64, *population])
            .collect();
        let color = categorical_color(0);
        let y_label = spec.y_label.clone();

        Plot::new(format!("trend_{:?}", self.id))
            .legend(Legend::default())
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .allow_scroll(false)
            .label_formatter(move |_name, value| {
                format!("Ano: {:.0}\n{}: {}", value.x, y_label, format_population(value.y))
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(color)
                        .width(self.line_width)
                        .name(&spec.y_label),
                );
                if self.show_points {
                    plot_ui.points(Points::new(points).color(color).radius(3.0));
                }
            });
    }
}

impl SpaceView for TrendLineView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "TrendLineView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        match &model.trend {
            ViewOutput::Chart(spec) => self.plot(ui, spec),
            ViewOutput::Notice(notice) => show_notice(ui, notice),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::spec::NoticeLevel;

    fn filter(country: &str) -> FilterState {
        FilterState {
            selected_year: 2020,
            selected_country: country.to_string(),
            comparison_year_a: Some(2000),
            comparison_year_b: Some(2020),
        }
    }

    #[test]
    fn brazil_trend_is_ordered_by_year() {
        let output = build_trend_line(&fixtures::frames(), &filter("Brazil")).unwrap();
        let spec = output.chart().unwrap();
        assert_eq!(spec.title, "Evolução da População - Brazil");
        assert_eq!(spec.x_label, "Ano");
        assert_eq!(spec.y_label, "População Total");
        assert_eq!(
            spec.points,
            vec![(2000, 175_873_720.0), (2019, 211_049_519.0), (2020, 212_559_409.0)]
        );
    }

    #[test]
    fn unknown_country_gets_a_warning() {
        let output = build_trend_line(&fixtures::frames(), &filter("Atlantis")).unwrap();
        let notice = output.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Nenhum dado encontrado para Atlantis.");
    }

    #[test]
    fn world_has_no_trend() {
        let output = build_trend_line(&fixtures::frames(), &filter("World")).unwrap();
        assert!(!output.is_chart());
    }
}
