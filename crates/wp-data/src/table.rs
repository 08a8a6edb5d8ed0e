//! Typed view over a population record batch

use std::sync::Arc;
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Float64Builder, Int64Array,
    Int64Builder, StringArray, StringBuilder, UInt32Array,
};
use arrow::compute;
use arrow::compute::kernels::cmp;
use arrow::datatypes::{Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::schema::{self, population_schema};
use crate::DataError;

const COUNTRY_IDX: usize = 0;
const ISO_CODE_IDX: usize = 1;
const YEAR_IDX: usize = 2;
const POPULATION_IDX: usize = 3;

/// One row of the working table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationRecord {
    pub country: String,
    pub iso_code: Option<String>,
    pub year: i64,
    pub population: f64,
}

impl PopulationRecord {
    pub fn new(country: &str, iso_code: Option<&str>, year: i64, population: f64) -> Self {
        Self {
            country: country.to_string(),
            iso_code: iso_code.map(str::to_string),
            year,
            population,
        }
    }
}

/// Record batch known to carry the display schema
///
/// Every derivation returns a new table; the underlying batch is never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationTable {
    batch: RecordBatch,
}

impl PopulationTable {
    /// Wrap a batch after checking its schema
    pub fn try_new(batch: RecordBatch) -> Result<Self, DataError> {
        schema::validate(&batch.schema())?;
        Ok(Self { batch })
    }

    /// Table with the display schema and no rows
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(population_schema()),
        }
    }

    /// Build a table from individual records
    pub fn from_records<I>(records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = PopulationRecord>,
    {
        let mut countries = StringBuilder::new();
        let mut iso_codes = StringBuilder::new();
        let mut years = Int64Builder::new();
        let mut populations = Float64Builder::new();

        for record in records {
            countries.append_value(&record.country);
            iso_codes.append_option(record.iso_code.as_deref());
            years.append_value(record.year);
            populations.append_value(record.population);
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(countries.finish()),
            Arc::new(iso_codes.finish()),
            Arc::new(years.finish()),
            Arc::new(populations.finish()),
        ];
        let batch = RecordBatch::try_new(population_schema(), columns)?;
        Ok(Self { batch })
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    fn countries(&self) -> &StringArray {
        self.batch.column(COUNTRY_IDX).as_string::<i32>()
    }

    fn iso_codes(&self) -> &StringArray {
        self.batch.column(ISO_CODE_IDX).as_string::<i32>()
    }

    fn years(&self) -> &Int64Array {
        self.batch.column(YEAR_IDX).as_primitive::<Int64Type>()
    }

    fn populations(&self) -> &Float64Array {
        self.batch.column(POPULATION_IDX).as_primitive::<Float64Type>()
    }

    pub fn country(&self, row: usize) -> &str {
        self.countries().value(row)
    }

    pub fn iso_code(&self, row: usize) -> Option<&str> {
        let codes = self.iso_codes();
        if codes.is_null(row) {
            None
        } else {
            Some(codes.value(row))
        }
    }

    pub fn year(&self, row: usize) -> i64 {
        self.years().value(row)
    }

    pub fn population(&self, row: usize) -> f64 {
        self.populations().value(row)
    }

    pub fn record(&self, row: usize) -> PopulationRecord {
        PopulationRecord::new(self.country(row), self.iso_code(row), self.year(row), self.population(row))
    }

    /// Iterate rows in table order
    pub fn records(&self) -> impl Iterator<Item = PopulationRecord> + '_ {
        (0..self.num_rows()).map(move |row| self.record(row))
    }

    /// Keep the rows where `predicate` is true (nulls count as false)
    pub fn filter(&self, predicate: &BooleanArray) -> Result<Self, DataError> {
        let batch = compute::filter_record_batch(&self.batch, predicate)?;
        Ok(Self { batch })
    }

    /// Keep the rows accepted by a closure
    pub fn filter_rows<F>(&self, keep: F) -> Result<Self, DataError>
    where
        F: Fn(&Self, usize) -> bool,
    {
        let predicate: BooleanArray = (0..self.num_rows())
            .map(|row| Some(keep(self, row)))
            .collect();
        self.filter(&predicate)
    }

    /// Rows of a single year
    pub fn where_year(&self, year: i64) -> Result<Self, DataError> {
        let predicate = cmp::eq(self.years(), &Int64Array::new_scalar(year))?;
        self.filter(&predicate)
    }

    /// Rows of a single country
    pub fn where_country(&self, country: &str) -> Result<Self, DataError> {
        let predicate = cmp::eq(self.countries(), &StringArray::new_scalar(country))?;
        self.filter(&predicate)
    }

    /// Rows whose country differs from `country`
    pub fn excluding_country(&self, country: &str) -> Result<Self, DataError> {
        let predicate = cmp::neq(self.countries(), &StringArray::new_scalar(country))?;
        self.filter(&predicate)
    }

    /// Rows at the given positions, in the given order
    pub fn take(&self, rows: &[u32]) -> Result<Self, DataError> {
        let indices = UInt32Array::from(rows.to_vec());
        let columns = self
            .batch
            .columns()
            .iter()
            .map(|column| compute::take(column.as_ref(), &indices, None))
            .collect::<Result<Vec<_>, _>>()?;
        let batch = RecordBatch::try_new(self.batch.schema(), columns)?;
        Ok(Self { batch })
    }

    /// Smallest and largest year, or `None` for an empty table
    pub fn year_range(&self) -> Option<(i64, i64)> {
        let years = self.years();
        Some((compute::min(years)?, compute::max(years)?))
    }

    /// Distinct years, ascending
    pub fn distinct_years(&self) -> Vec<i64> {
        let mut years: Vec<i64> = self.years().values().iter().copied().collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct country names, alphabetical
    pub fn distinct_countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .countries()
            .iter()
            .flatten()
            .map(str::to_string)
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }
}
