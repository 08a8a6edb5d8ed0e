//! Everything one render of the dashboard shows
//!
//! The model is rebuilt from the prepared frames whenever the filter
//! snapshot changes. Building is pure: the same frames and filter always
//! give an equal model.

use wp_core::{DashboardConfig, FilterState};
use wp_data::{DataError, PopulationFrames, PopulationTable};

use crate::plots::{
    build_animated_choropleth, build_choropleth, build_top_population_bar, build_trend_line,
    build_year_comparison,
};
use crate::spec::{
    AnimatedChoroplethSpec, BarChartSpec, ChoroplethSpec, LineChartSpec, ScatterSpec, ViewOutput,
};
use crate::stats::MetricsBlock;
use crate::tables::build_raw_table;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    /// Snapshot the model was built for
    pub filter: FilterState,
    pub metrics: MetricsBlock,
    pub trend: ViewOutput<LineChartSpec>,
    pub top_countries: ViewOutput<BarChartSpec>,
    pub map: ViewOutput<ChoroplethSpec>,
    pub animated_map: ViewOutput<AnimatedChoroplethSpec>,
    pub comparison: ViewOutput<ScatterSpec>,
    pub raw_table: ViewOutput<PopulationTable>,
}

impl DashboardModel {
    pub fn build(
        frames: &PopulationFrames,
        filter: &FilterState,
        config: &DashboardConfig,
    ) -> Result<Self, DataError> {
        let model = Self {
            filter: filter.clone(),
            metrics: MetricsBlock::build(frames, filter),
            trend: build_trend_line(frames, filter)?,
            top_countries: build_top_population_bar(frames, filter, config.top_n)?,
            map: build_choropleth(frames, filter)?,
            animated_map: build_animated_choropleth(frames)?,
            comparison: build_year_comparison(frames, filter)?,
            raw_table: build_raw_table(frames),
        };

        tracing::debug!(
            "Built dashboard for {} / {} ({} notices)",
            filter.selected_country,
            filter.selected_year,
            model.notice_count()
        );
        Ok(model)
    }

    /// Number of charts replaced by a notice
    pub fn notice_count(&self) -> usize {
        [
            self.trend.is_chart(),
            self.top_countries.is_chart(),
            self.map.is_chart(),
            self.animated_map.is_chart(),
            self.comparison.is_chart(),
            self.raw_table.is_chart(),
        ]
        .iter()
        .filter(|is_chart| !**is_chart)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::spec::NoticeLevel;

    fn filter(country: &str, year: i64, a: i64, b: i64) -> FilterState {
        FilterState {
            selected_year: year,
            selected_country: country.to_string(),
            comparison_year_a: Some(a),
            comparison_year_b: Some(b),
        }
    }

    #[test]
    fn brazil_in_2020() {
        let frames = fixtures::frames();
        let model = DashboardModel::build(&frames, &filter("Brazil", 2020, 2000, 2020), &DashboardConfig::default()).unwrap();

        assert_eq!(model.notice_count(), 0);
        assert_eq!(model.metrics.selected_country.population(), Some(212_559_409.0));
        assert_eq!(model.trend.chart().unwrap().points.last(), Some(&(2020, 212_559_409.0)));

        let top = model.top_countries.chart().unwrap();
        assert!(top.bars.len() <= 5);
        assert!(top.bars.iter().all(|b| b.country != "World"));
    }

    #[test]
    fn same_comparison_years_only_affect_the_scatter() {
        let frames = fixtures::frames();
        let model = DashboardModel::build(&frames, &filter("Brazil", 2020, 2000, 2000), &DashboardConfig::default()).unwrap();

        assert_eq!(model.notice_count(), 1);
        assert_eq!(model.comparison.notice().unwrap().level, NoticeLevel::Info);
    }

    #[test]
    fn unknown_country_degrades_gracefully() {
        let frames = fixtures::frames();
        let model = DashboardModel::build(&frames, &filter("Atlantis", 2020, 2000, 2020), &DashboardConfig::default()).unwrap();

        assert!(model.trend.notice().is_some());
        assert_eq!(model.metrics.selected_country.population(), None);
        assert!(model.top_countries.is_chart());
    }

    #[test]
    fn building_is_idempotent() {
        let frames = fixtures::frames();
        let filter = filter("India", 2019, 2020, 2000);
        let config = DashboardConfig::default();
        assert_eq!(
            DashboardModel::build(&frames, &filter, &config).unwrap(),
            DashboardModel::build(&frames, &filter, &config).unwrap()
        );
    }

    #[test]
    fn top_n_follows_the_config() {
        let frames = fixtures::frames();
        let config = DashboardConfig { top_n: 3, ..DashboardConfig::default() };
        let model = DashboardModel::build(&frames, &filter("Brazil", 2020, 2000, 2020), &config).unwrap();
        assert_eq!(model.top_countries.chart().unwrap().bars.len(), 3);
    }

    #[test]
    fn empty_frames_show_notices() {
        let frames = PopulationFrames::prepare(PopulationTable::empty()).unwrap();
        let model = DashboardModel::build(&frames, &filter("Brazil", 2020, 2000, 2020), &DashboardConfig::default()).unwrap();
        assert_eq!(model.notice_count(), 6);
        assert_eq!(model.comparison.notice().unwrap().level, NoticeLevel::Warning);
    }
}
