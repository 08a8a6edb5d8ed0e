//! Scalar summaries shown above the charts

use std::cmp::Ordering;
use serde::Serialize;

use crate::table::PopulationTable;

/// Headline figures of the country table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub earliest_year: i64,
    pub latest_year: i64,
    /// `None` only if the latest year has no rows, which cannot happen for
    /// a non-empty table but is kept explicit
    pub least_populous_country: Option<String>,
}

/// Population of one country in one year, or an explicit miss
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CountryPopulation {
    Available {
        country: String,
        year: i64,
        population: f64,
    },
    Unavailable {
        country: String,
        year: Option<i64>,
    },
}

impl CountryPopulation {
    pub fn population(&self) -> Option<f64> {
        match self {
            CountryPopulation::Available { population, .. } => Some(*population),
            CountryPopulation::Unavailable { .. } => None,
        }
    }

    pub fn country(&self) -> &str {
        match self {
            CountryPopulation::Available { country, .. } | CountryPopulation::Unavailable { country, .. } => country,
        }
    }
}

/// Earliest and latest year plus the least populous country of the latest
/// year; `None` for an empty table
pub fn headline_metrics(countries_only: &PopulationTable) -> Option<HeadlineMetrics> {
    let (earliest_year, latest_year) = countries_only.year_range()?;
    Some(HeadlineMetrics {
        earliest_year,
        latest_year,
        least_populous_country: least_populous_country(countries_only, latest_year),
    })
}

/// Country with the smallest population in `year`; ties go to the
/// alphabetically first name
pub fn least_populous_country(table: &PopulationTable, year: i64) -> Option<String> {
    (0..table.num_rows())
        .filter(|row| table.year(*row) == year)
        .min_by(|a, b| {
            table
                .population(*a)
                .total_cmp(&table.population(*b))
                .then_with(|| table.country(*a).cmp(table.country(*b)))
        })
        .map(|row| table.country(row).to_string())
}

/// Population of `country` in `year`
pub fn country_population(table: &PopulationTable, country: &str, year: i64) -> CountryPopulation {
    let found = (0..table.num_rows())
        .find(|row| table.year(*row) == year && table.country(*row) == country);

    match found {
        Some(row) => CountryPopulation::Available {
            country: country.to_string(),
            year,
            population: table.population(row),
        },
        None => {
            tracing::debug!("No population for '{}' in {}", country, year);
            CountryPopulation::Unavailable {
                country: country.to_string(),
                year: Some(year),
            }
        }
    }
}

/// Population of `country` in the latest year of the table
pub fn latest_country_population(countries_only: &PopulationTable, country: &str) -> CountryPopulation {
    match countries_only.year_range() {
        Some((_, latest)) => country_population(countries_only, country, latest),
        None => CountryPopulation::Unavailable {
            country: country.to_string(),
            year: None,
        },
    }
}

/// Format a population with thousands separators, e.g. `212,559,000`
pub fn format_population(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match rounded.partial_cmp(&0.0) {
        Some(Ordering::Less) => format!("-{}", grouped),
        _ => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PopulationRecord;

    fn table() -> PopulationTable {
        PopulationTable::from_records(vec![
            PopulationRecord::new("Brazil", Some("BRA"), 2020, 212_559_000.0),
            PopulationRecord::new("World", Some("WLD"), 2020, 7_794_799_000.0),
            PopulationRecord::new("Tuvalu", Some("TUV"), 2020, 11_792.0),
            PopulationRecord::new("Nauru", Some("NRU"), 2020, 11_792.0),
            PopulationRecord::new("Chile", Some("CHL"), 1990, 13_000_000.0),
        ])
        .unwrap()
    }

    #[test]
    fn headline_metrics_use_latest_year() {
        let metrics = headline_metrics(&table()).unwrap();
        assert_eq!(metrics.earliest_year, 1990);
        assert_eq!(metrics.latest_year, 2020);
        // Nauru and Tuvalu tie; the alphabetical order decides
        assert_eq!(metrics.least_populous_country.as_deref(), Some("Nauru"));
    }

    #[test]
    fn selected_country_population_in_latest_year() {
        let table = table();
        let brazil = latest_country_population(&table, "Brazil");
        assert_eq!(brazil.population(), Some(212_559_000.0));
        assert_eq!(brazil.country(), "Brazil");
    }

    #[test]
    fn missing_country_is_unavailable() {
        let table = table();
        // Chile has no row in the latest year
        assert_eq!(
            latest_country_population(&table, "Chile"),
            CountryPopulation::Unavailable { country: "Chile".into(), year: Some(2020) }
        );
        assert_eq!(latest_country_population(&table, "Atlantis").population(), None);
        assert_eq!(
            latest_country_population(&PopulationTable::empty(), "Brazil"),
            CountryPopulation::Unavailable { country: "Brazil".into(), year: None }
        );
    }

    #[test]
    fn empty_table_has_no_metrics() {
        assert!(headline_metrics(&PopulationTable::empty()).is_none());
        assert!(least_populous_country(&table(), 1800).is_none());
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_population(212_559_000.0), "212,559,000");
        assert_eq!(format_population(999.4), "999");
        assert_eq!(format_population(1_000.0), "1,000");
        assert_eq!(format_population(0.0), "0");
        assert_eq!(format_population(-12_345.0), "-12,345");
    }
}
