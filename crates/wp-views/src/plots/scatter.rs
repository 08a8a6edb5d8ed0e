//! Population of two years plotted against each other

use std::any::Any;
use egui::Ui;
use egui_plot::{Plot, Points};
use wp_core::FilterState;
use wp_data::metrics::format_population;
use wp_data::{compare_years, DataError, PopulationFrames};

use super::utils::{categorical_color, chart_header, show_notice, waiting_for_data};
use crate::spec::{Notice, ScatterPoint, ScatterSpec, ViewOutput};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Countries present in both comparison years, year A on x and year B on y
pub fn build_year_comparison(
    frames: &PopulationFrames,
    filter: &FilterState,
) -> Result<ViewOutput<ScatterSpec>, DataError> {
    let comparison = match filter.comparison_years() {
        Some((year_a, year_b)) => compare_years(frames.countries_no_world(), year_a, year_b)?,
        None => None,
    };

    let Some(comparison) = comparison else {
        return Ok(ViewOutput::Notice(Notice::info(
            "Selecione dois anos diferentes para a comparação.",
        )));
    };

    if comparison.rows.is_empty() {
        return Ok(ViewOutput::Notice(Notice::warning(
            "Nenhum país tem dados nos dois anos.",
        )));
    }

    let points = comparison
        .rows
        .into_iter()
        .map(|row| ScatterPoint {
            country: row.country,
            x: row.population_a,
            y: row.population_b,
        })
        .collect();

    Ok(ViewOutput::Chart(ScatterSpec {
        title: format!("População de {} vs. {}", comparison.year_b, comparison.year_a),
        x_label: comparison.label_a,
        y_label: comparison.label_b,
        points,
    }))
}

/// Point closest to `(x, y)`
pub fn nearest_point(points: &[ScatterPoint], x: f64, y: f64) -> Option<&ScatterPoint> {
    points.iter().min_by(|a, b| {
        let da = (a.x - x).powi(2) + (a.y - y).powi(2);
        let db = (b.x - x).powi(2) + (b.y - y).powi(2);
        da.total_cmp(&db)
    })
}

/// Scatter plot view
pub struct YearComparisonView {
    id: SpaceViewId,
    title: String,
    point_radius: f32,
}

impl YearComparisonView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            title: "Comparação".to_string(),
            point_radius: 4.0,
        }
    }

    fn plot(&self, ui: &mut Ui, spec: &ScatterSpec) {
        chart_header(ui, &spec.title, spec);

        let hover_points = spec.points.clone();
        let x_label = spec.x_label.clone();
        let y_label = spec.y_label.clone();
        let points: Vec<[f64; 2]> = spec.points.iter().map(|p| [p.x, p.y]).collect();

        Plot::new(format!("comparison_{:?}", self.id))
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .data_aspect(1.0)
            .allow_scroll(false)
            .label_formatter(move |_name, value| match nearest_point(&hover_points, value.x, value.y) {
                Some(p) => format!(
                    "{}\n{}: {}\n{}: {}",
                    p.country,
                    x_label,
                    format_population(p.x),
                    y_label,
                    format_population(p.y)
                ),
                None => String::new(),
            })
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(self.point_radius)
                        .color(categorical_color(0)),
                );
            });
    }
}

impl SpaceView for YearComparisonView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "YearComparisonView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ui.label("Compare a população de cada país em dois anos.");

        let Some(model) = ctx.model() else {
            waiting_for_data(ui);
            return;
        };

        match &model.comparison {
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
    use wp_data::{PopulationRecord, PopulationTable};

    fn filter(year_a: Option<i64>, year_b: Option<i64>) -> FilterState {
        FilterState {
            selected_year: 2020,
            selected_country: "Brazil".to_string(),
            comparison_year_a: year_a,
            comparison_year_b: year_b,
        }
    }

    #[test]
    fn compares_countries_present_in_both_years() {
        let output = build_year_comparison(&fixtures::frames(), &filter(Some(2000), Some(2020))).unwrap();
        let spec = output.chart().unwrap();

        assert_eq!(spec.title, "População de 2020 vs. 2000");
        assert_eq!(spec.x_label, "População 2000");
        assert_eq!(spec.y_label, "População 2020");

        let countries: Vec<_> = spec.points.iter().map(|p| p.country.as_str()).collect();
        assert_eq!(countries, vec!["Afghanistan", "Brazil", "China", "India", "United States"]);
        // Indonesia and Pakistan only have 2020 rows
        assert!(!countries.contains(&"Indonesia"));
        assert!(!countries.contains(&"World"));
    }

    #[test]
    fn equal_years_ask_for_a_different_year() {
        let output = build_year_comparison(&fixtures::frames(), &filter(Some(2000), Some(2000))).unwrap();
        let notice = output.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Selecione dois anos diferentes para a comparação.");
    }

    #[test]
    fn unset_year_asks_for_a_selection() {
        let output = build_year_comparison(&fixtures::frames(), &filter(None, Some(2020))).unwrap();
        assert!(!output.is_chart());
    }

    #[test]
    fn years_without_shared_countries_warn() {
        let table = PopulationTable::from_records(vec![
            PopulationRecord::new("Brazil", Some("BRA"), 2000, 175_873_720.0),
            PopulationRecord::new("Chile", Some("CHL"), 2020, 19_300_315.0),
        ])
        .unwrap();
        let frames = PopulationFrames::prepare(table).unwrap();

        let output = build_year_comparison(&frames, &filter(Some(2000), Some(2020))).unwrap();
        let notice = output.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Nenhum país tem dados nos dois anos.");
    }

    #[test]
    fn empty_frames_warn() {
        let frames = PopulationFrames::prepare(PopulationTable::empty()).unwrap();
        let output = build_year_comparison(&frames, &filter(Some(2000), Some(2020))).unwrap();
        assert_eq!(output.notice().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn nearest_point_by_distance() {
        let points = vec![
            ScatterPoint { country: "A".into(), x: 0.0, y: 0.0 },
            ScatterPoint { country: "B".into(), x: 10.0, y: 10.0 },
        ];
        assert_eq!(nearest_point(&points, 8.0, 9.0).unwrap().country, "B");
        assert!(nearest_point(&[], 0.0, 0.0).is_none());
    }
}
