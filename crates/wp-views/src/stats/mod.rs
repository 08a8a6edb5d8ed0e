//! Headline metrics shown above the charts

use egui::{RichText, Ui};
use serde::Serialize;
use wp_core::FilterState;
use wp_data::metrics::{format_population, headline_metrics, latest_country_population};
use wp_data::{CountryPopulation, HeadlineMetrics, PopulationFrames};

/// Values of the metric cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsBlock {
    /// `None` when the country table is empty
    pub headline: Option<HeadlineMetrics>,
    pub selected_country: CountryPopulation,
}

impl MetricsBlock {
    pub fn build(frames: &PopulationFrames, filter: &FilterState) -> Self {
        let countries_only = frames.countries_only();
        Self {
            headline: headline_metrics(countries_only),
            selected_country: latest_country_population(countries_only, &filter.selected_country),
        }
    }
}

/// Row of metric cards
pub struct MetricsPanel;

impl MetricsPanel {
    pub fn ui(ui: &mut Ui, metrics: &MetricsBlock) {
        let headline = metrics.headline.as_ref();
        let earliest = headline.map_or_else(|| "—".to_string(), |h| h.earliest_year.to_string());
        let latest = headline.map_or_else(|| "—".to_string(), |h| h.latest_year.to_string());
        let least = headline
            .and_then(|h| h.least_populous_country.clone())
            .unwrap_or_else(|| "—".to_string());

        ui.columns(3, |columns| {
            metric_card(&mut columns[0], "Ano mais antigo", &earliest);
            metric_card(&mut columns[1], "Ano mais recente", &latest);
            metric_card(&mut columns[2], "País menos populoso", &least);
        });

        ui.separator();

        let label = format!("População do País Selecionado - {}", metrics.selected_country.country());
        match &metrics.selected_country {
            CountryPopulation::Available { population, .. } => {
                metric_card(ui, &label, &format_population(*population));
            }
            CountryPopulation::Unavailable { year, .. } => {
                let value = match year {
                    Some(year) => format!("Sem dados para {}", year),
                    None => "Sem dados".to_string(),
                };
                metric_card(ui, &label, &value);
            }
        }
    }
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(26.0).strong());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use wp_data::PopulationTable;

    fn filter(country: &str) -> FilterState {
        FilterState {
            selected_year: 2020,
            selected_country: country.to_string(),
            comparison_year_a: None,
            comparison_year_b: None,
        }
    }

    #[test]
    fn metrics_cover_the_country_table() {
        let metrics = MetricsBlock::build(&fixtures::frames(), &filter("Brazil"));
        let headline = metrics.headline.unwrap();
        assert_eq!(headline.earliest_year, 2000);
        assert_eq!(headline.latest_year, 2020);
        assert_eq!(headline.least_populous_country.as_deref(), Some("Afghanistan"));
        assert_eq!(metrics.selected_country.population(), Some(212_559_409.0));
    }

    #[test]
    fn world_counts_as_a_selectable_country() {
        let metrics = MetricsBlock::build(&fixtures::frames(), &filter("World"));
        assert_eq!(metrics.selected_country.population(), Some(7_794_798_729.0));
    }

    #[test]
    fn unknown_country_is_unavailable() {
        let metrics = MetricsBlock::build(&fixtures::frames(), &filter("Atlantis"));
        assert_eq!(
            metrics.selected_country,
            CountryPopulation::Unavailable { country: "Atlantis".into(), year: Some(2020) }
        );
    }

    #[test]
    fn empty_frames_have_no_headline() {
        let frames = PopulationFrames::prepare(PopulationTable::empty()).unwrap();
        let metrics = MetricsBlock::build(&frames, &filter("Brazil"));
        assert!(metrics.headline.is_none());
        assert_eq!(metrics.selected_country.population(), None);
    }
}
