//! Year-over-year comparison of country populations

use ahash::AHashMap;
use serde::Serialize;
use wp_core::columns::year_population_label;

use crate::table::PopulationTable;
use crate::DataError;

/// Population of one country in both compared years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub country: String,
    pub population_a: f64,
    pub population_b: f64,
}

/// Inner join of two single-year tables on the country name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparison {
    pub year_a: i64,
    pub year_b: i64,
    /// Year-qualified column label of the first year, e.g. `População 1960`
    pub label_a: String,
    pub label_b: String,
    /// Countries present in both years, in the row order of year A
    pub rows: Vec<ComparisonRow>,
}

impl YearComparison {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Join the rows of `year_a` with the rows of `year_b` by country
///
/// Returns `None` when both years are equal; countries missing from either
/// year are dropped.
pub fn compare_years(
    table: &PopulationTable,
    year_a: i64,
    year_b: i64,
) -> Result<Option<YearComparison>, DataError> {
    if year_a == year_b {
        return Ok(None);
    }

    let table_a = table.where_year(year_a)?;
    let table_b = table.where_year(year_b)?;

    let mut by_country: AHashMap<&str, f64> = AHashMap::with_capacity(table_b.num_rows());
    for row in 0..table_b.num_rows() {
        by_country.entry(table_b.country(row)).or_insert(table_b.population(row));
    }

    let rows: Vec<ComparisonRow> = (0..table_a.num_rows())
        .filter_map(|row| {
            let country = table_a.country(row);
            by_country.get(country).map(|population_b| ComparisonRow {
                country: country.to_string(),
                population_a: table_a.population(row),
                population_b: *population_b,
            })
        })
        .collect();

    tracing::debug!(
        "Compared {} vs {}: {} / {} rows, {} matched",
        year_a,
        year_b,
        table_a.num_rows(),
        table_b.num_rows(),
        rows.len()
    );

    Ok(Some(YearComparison {
        year_a,
        year_b,
        label_a: year_population_label(year_a),
        label_b: year_population_label(year_b),
        rows,
    }))
}
