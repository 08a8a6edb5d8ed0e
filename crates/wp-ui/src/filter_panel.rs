//! Sidebar with the dashboard filters
//! Year slider with stepping, country selector and comparison years

use std::sync::Arc;
use egui::{ComboBox, RichText, Slider, Ui};
use wp_core::{FilterController, FilterDomain, FilterState};

/// Filter sidebar widget
///
/// Every change goes through the [`FilterController`]; the panel itself only
/// keeps the text of the country search box.
pub struct FilterPanel {
    controller: Arc<FilterController>,
    country_search: String,
}

impl FilterPanel {
    pub fn new(controller: Arc<FilterController>) -> Self {
        Self {
            controller,
            country_search: String::new(),
        }
    }

    /// Show the filters; disabled until a domain is loaded
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading(format!("{} Filtros", crate::icons::FILTER));
        ui.separator();

        let domain = self.controller.domain();
        let Some(state) = self.controller.snapshot() else {
            ui.label(RichText::new("Nenhum dado carregado.").weak());
            return;
        };

        self.year_controls(ui, &domain, &state);
        ui.add_space(8.0);
        self.country_selector(ui, &domain, &state);
        ui.add_space(16.0);

        ui.heading("📊 Comparação de Crescimento Populacional");
        self.comparison_selectors(ui, &domain, &state);
    }

    fn year_controls(&self, ui: &mut Ui, domain: &FilterDomain, state: &FilterState) {
        let (Some(min), Some(max)) = (domain.earliest_year(), domain.latest_year()) else {
            return;
        };

        ui.label("Selecione o ano");
        let mut year = state.selected_year;
        if ui.add(Slider::new(&mut year, min..=max)).changed() {
            self.apply(self.controller.set_year(year));
        }

        ui.horizontal(|ui| {
            if ui.small_button("◀").on_hover_text("Ano anterior").clicked() {
                self.apply(self.controller.previous_year());
            }
            if ui.small_button("▶").on_hover_text("Próximo ano").clicked() {
                self.apply(self.controller.next_year());
            }
            if !domain.contains_year(state.selected_year) {
                ui.label(RichText::new("Ano sem dados").weak());
            }
        });
    }

    fn country_selector(&mut self, ui: &mut Ui, domain: &FilterDomain, state: &FilterState) {
        ui.label("Selecione um país para análise");
        let mut selected = state.selected_country.clone();

        ComboBox::from_id_source("country_selector")
            .selected_text(selected.as_str())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.text_edit_singleline(&mut self.country_search);
                let needle = self.country_search.to_lowercase();
                for country in matching_countries(&domain.countries, &needle) {
                    ui.selectable_value(&mut selected, country.clone(), country.as_str());
                }
            });

        if selected != state.selected_country {
            self.apply(self.controller.set_country(&selected));
        }
    }

    fn comparison_selectors(&self, ui: &mut Ui, domain: &FilterDomain, state: &FilterState) {
        let mut year_a = state.comparison_year_a;
        let mut year_b = state.comparison_year_b;

        ui.columns(2, |columns| {
            year_combo(&mut columns[0], "comparison_year_a", "Selecione o primeiro ano", &domain.years, &mut year_a);
            year_combo(&mut columns[1], "comparison_year_b", "Selecione o segundo ano", &domain.years, &mut year_b);
        });

        if year_a != state.comparison_year_a || year_b != state.comparison_year_b {
            self.apply(self.controller.set_comparison_years(year_a, year_b));
        }
    }

    fn apply(&self, result: Result<(), String>) {
        if let Err(e) = result {
            tracing::warn!("Filter change rejected: {}", e);
        }
    }
}

/// Countries whose name contains `needle` (already lowercased)
fn matching_countries<'a>(countries: &'a [String], needle: &'a str) -> impl Iterator<Item = &'a String> + 'a {
    countries
        .iter()
        .filter(move |country| needle.is_empty() || country.to_lowercase().contains(needle))
}

fn year_combo(ui: &mut Ui, id: &str, label: &str, years: &[i64], value: &mut Option<i64>) {
    ui.label(label);
    let text = value.map_or_else(|| "—".to_string(), |year| year.to_string());
    ComboBox::from_id_source(id)
        .selected_text(text)
        .show_ui(ui, |ui| {
            for year in years {
                ui.selectable_value(value, Some(*year), year.to_string());
            }
        });
}
