//! Schema of the working table and header resolution for source files

use std::sync::Arc;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use csv::StringRecord;
use wp_core::columns::{self, RENAMES};

use crate::DataError;

/// Display schema every loaded table is converted to
pub fn population_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(columns::COUNTRY, DataType::Utf8, false),
        Field::new(columns::ISO_CODE, DataType::Utf8, true),
        Field::new(columns::YEAR, DataType::Int64, false),
        Field::new(columns::POPULATION, DataType::Float64, false),
    ]))
}

/// Positions of the required source columns inside a CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceColumns {
    pub country: usize,
    pub iso_code: usize,
    pub year: usize,
    pub population: usize,
}

impl SourceColumns {
    /// Locate every required column; all missing names are reported at once
    ///
    /// Extra columns are ignored and header names are matched after trimming.
    pub fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let found: Vec<Option<usize>> = RENAMES.iter().map(|(source, _)| position(source)).collect();
        let missing: Vec<String> = RENAMES
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|((source, _), _)| source.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DataError::MissingColumns(missing));
        }

        match found.as_slice() {
            [Some(country), Some(iso_code), Some(year), Some(population)] => Ok(Self {
                country: *country,
                iso_code: *iso_code,
                year: *year,
                population: *population,
            }),
            _ => Err(DataError::Schema("header resolution out of sync with column renames".into())),
        }
    }
}

/// Check that a batch has exactly the display schema
pub fn validate(schema: &Schema) -> Result<(), DataError> {
    let expected = population_schema();
    if expected.fields().len() != schema.fields().len() {
        return Err(DataError::Schema(format!(
            "expected {} columns, found {}",
            expected.fields().len(),
            schema.fields().len()
        )));
    }

    for (want, got) in expected.fields().iter().zip(schema.fields()) {
        if want.name() != got.name() || want.data_type() != got.data_type() {
            return Err(DataError::Schema(format!(
                "expected column '{}' ({:?}), found '{}' ({:?})",
                want.name(),
                want.data_type(),
                got.name(),
                got.data_type()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_columns_in_any_order() {
        let headers = StringRecord::from(vec!["Year", "Value", "Country Code", "Country Name", "Extra"]);
        let columns = SourceColumns::resolve(&headers).unwrap();
        assert_eq!(
            columns,
            SourceColumns { country: 3, iso_code: 2, year: 0, population: 1 }
        );
    }

    #[test]
    fn reports_every_missing_column() {
        let headers = StringRecord::from(vec!["Country Name", "Year"]);
        match SourceColumns::resolve(&headers) {
            Err(DataError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Country Code".to_string(), "Value".to_string()]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_source_schema() {
        let source = Schema::new(vec![
            Field::new("Country Name", DataType::Utf8, false),
            Field::new("Country Code", DataType::Utf8, true),
            Field::new("Year", DataType::Int64, false),
            Field::new("Value", DataType::Float64, false),
        ]);
        assert!(validate(&source).is_err());
        assert!(validate(&population_schema()).is_ok());
    }
}
