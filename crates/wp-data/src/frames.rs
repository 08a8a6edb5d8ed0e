//! Derived views of the loaded table

use wp_core::columns::{ISO_CODE_LEN, WORLD};
use wp_core::FilterDomain;

use crate::table::PopulationTable;
use crate::DataError;

/// The loaded table and the two views every chart is built from
#[derive(Debug, Clone)]
pub struct PopulationFrames {
    all: PopulationTable,
    countries_only: PopulationTable,
    countries_no_world: PopulationTable,
}

impl PopulationFrames {
    /// Derive both views from a freshly loaded table
    pub fn prepare(all: PopulationTable) -> Result<Self, DataError> {
        let countries_only = countries_only(&all)?;
        let countries_no_world = countries_only.excluding_country(WORLD)?;

        tracing::debug!(
            "Prepared frames: {} rows, {} country rows, {} without '{}'",
            all.num_rows(),
            countries_only.num_rows(),
            countries_no_world.num_rows(),
            WORLD
        );

        Ok(Self {
            all,
            countries_only,
            countries_no_world,
        })
    }

    /// Everything the loader returned, aggregates included
    pub fn all(&self) -> &PopulationTable {
        &self.all
    }

    /// Rows with a three-letter ISO code
    pub fn countries_only(&self) -> &PopulationTable {
        &self.countries_only
    }

    /// Country rows without the global total
    pub fn countries_no_world(&self) -> &PopulationTable {
        &self.countries_no_world
    }

    /// Years and countries offered by the filter widgets
    pub fn domain(&self) -> FilterDomain {
        FilterDomain::new(
            self.countries_only.distinct_years(),
            self.countries_only.distinct_countries(),
        )
    }
}

/// Whether an ISO code identifies a country or territory rather than an aggregate
pub fn is_country_code(code: Option<&str>) -> bool {
    code.map_or(false, |c| c.chars().count() == ISO_CODE_LEN)
}

/// Rows whose ISO code has exactly three characters
pub fn countries_only(table: &PopulationTable) -> Result<PopulationTable, DataError> {
    table.filter_rows(|t, row| is_country_code(t.iso_code(row)))
}
