use serde::{Serialize, Deserialize};

mod engine;

pub use engine::FilterController;

/// User selections that drive every derivation of a render
///
/// A value of this type is a snapshot: derivations receive it by reference
/// and never read widget state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Year shown by the top-N bar chart and the single-year map
    pub selected_year: i64,
    /// Country shown by the trend line and the population metric
    pub selected_country: String,
    /// First year of the comparison scatter
    pub comparison_year_a: Option<i64>,
    /// Second year of the comparison scatter
    pub comparison_year_b: Option<i64>,
}

impl FilterState {
    /// Session defaults for a domain, or `None` when the domain is empty
    pub fn defaults_for(domain: &FilterDomain, preferred_year: i64) -> Option<Self> {
        let selected_year = domain.nearest_year(preferred_year)?;
        let selected_country = domain.countries.first()?.clone();

        Some(Self {
            selected_year,
            selected_country,
            comparison_year_a: domain.earliest_year(),
            comparison_year_b: domain.latest_year(),
        })
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.selected_year = year;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.selected_country = country.into();
        self
    }

    pub fn with_comparison(mut self, year_a: Option<i64>, year_b: Option<i64>) -> Self {
        self.comparison_year_a = year_a;
        self.comparison_year_b = year_b;
        self
    }

    /// Both comparison years, when set and distinct
    pub fn comparison_years(&self) -> Option<(i64, i64)> {
        match (self.comparison_year_a, self.comparison_year_b) {
            (Some(a), Some(b)) if a != b => Some((a, b)),
            _ => None,
        }
    }
}

/// Values the filter widgets may take, derived from the loaded data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDomain {
    /// Distinct years, ascending
    pub years: Vec<i64>,
    /// Distinct country names, alphabetical
    pub countries: Vec<String>,
}

impl FilterDomain {
    /// Build a domain from unsorted values; duplicates are removed
    pub fn new(mut years: Vec<i64>, mut countries: Vec<String>) -> Self {
        years.sort_unstable();
        years.dedup();
        countries.sort();
        countries.dedup();
        Self { years, countries }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.countries.is_empty()
    }

    pub fn earliest_year(&self) -> Option<i64> {
        self.years.first().copied()
    }

    pub fn latest_year(&self) -> Option<i64> {
        self.years.last().copied()
    }

    pub fn contains_year(&self, year: i64) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.binary_search_by(|c| c.as_str().cmp(country)).is_ok()
    }

    /// Available year closest to `target`; ties go to the earlier year
    pub fn nearest_year(&self, target: i64) -> Option<i64> {
        self.years
            .iter()
            .copied()
            .min_by_key(|year| ((year - target).abs(), *year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> FilterDomain {
        FilterDomain::new(
            vec![2019, 1960, 2021, 2019],
            vec!["Brazil".into(), "Aruba".into(), "World".into()],
        )
    }

    #[test]
    fn domain_is_sorted_and_deduplicated() {
        let domain = domain();
        assert_eq!(domain.years, vec![1960, 2019, 2021]);
        assert_eq!(domain.countries, vec!["Aruba", "Brazil", "World"]);
        assert!(domain.contains_country("Brazil"));
        assert!(!domain.contains_country("Chile"));
    }

    #[test]
    fn nearest_year_prefers_exact_then_earlier() {
        let domain = domain();
        // 2020 is equidistant from 2019 and 2021
        assert_eq!(domain.nearest_year(2020), Some(2019));
        assert_eq!(domain.nearest_year(2021), Some(2021));
        assert_eq!(domain.nearest_year(1900), Some(1960));
        assert_eq!(FilterDomain::default().nearest_year(2020), None);
    }

    #[test]
    fn defaults_follow_the_domain() {
        let state = FilterState::defaults_for(&domain(), 2020).unwrap();
        assert_eq!(state.selected_year, 2019);
        assert_eq!(state.selected_country, "Aruba");
        assert_eq!(state.comparison_year_a, Some(1960));
        assert_eq!(state.comparison_year_b, Some(2021));
        assert_eq!(state.comparison_years(), Some((1960, 2021)));
    }

    #[test]
    fn equal_or_unset_comparison_years_are_not_comparable() {
        let state = FilterState::defaults_for(&domain(), 2020).unwrap();
        assert_eq!(state.clone().with_comparison(Some(2000), Some(2000)).comparison_years(), None);
        assert_eq!(state.with_comparison(None, Some(2000)).comparison_years(), None);
    }

    #[test]
    fn empty_domain_has_no_defaults() {
        assert!(FilterState::defaults_for(&FilterDomain::default(), 2020).is_none());
    }
}
