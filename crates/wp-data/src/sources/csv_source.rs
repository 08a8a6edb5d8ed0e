use std::path::PathBuf;
use std::sync::Arc;
use std::fs::File;
use std::io::{BufReader, Read};
use async_trait::async_trait;
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use ahash::AHashSet;
use csv::ReaderBuilder;
use wp_core::columns::{SOURCE_COUNTRY, SOURCE_POPULATION, SOURCE_YEAR};

use crate::config::LoaderConfig;
use crate::schema::{population_schema, SourceColumns};
use crate::DataError;

/// What happened to the rows of a parsed file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Data rows read, header excluded
    pub rows_read: usize,
    /// Rows in the resulting batch
    pub rows_kept: usize,
    /// Later repeats of an already seen (country, year) pair
    pub duplicates_dropped: usize,
    /// Rows without a population value
    pub missing_values_dropped: usize,
}

/// Parse a population CSV into a batch with the display schema
///
/// The first occurrence of a `(country, year)` pair wins; rows with a null
/// population are skipped. Unparsable required cells abort the load.
pub fn parse_population_csv<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> Result<(RecordBatch, ParseReport), DataError> {
    let nulls = &config.null_config;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = SourceColumns::resolve(&headers)?;

    let mut countries = StringBuilder::new();
    let mut iso_codes = StringBuilder::new();
    let mut years = Int64Builder::new();
    let mut populations = Float64Builder::new();

    let mut report = ParseReport::default();
    let mut seen: AHashSet<(String, i64)> = AHashSet::new();

    for result in csv_reader.records() {
        let record = result?;
        report.rows_read += 1;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let malformed = |column: &'static str, idx: usize| DataError::Malformed {
            line,
            column,
            value: cell(idx).to_string(),
        };

        let country = nulls
            .value(cell(columns.country))
            .ok_or_else(|| malformed(SOURCE_COUNTRY, columns.country))?;

        let year = nulls
            .value(cell(columns.year))
            .and_then(parse_year)
            .ok_or_else(|| malformed(SOURCE_YEAR, columns.year))?;

        let population = match nulls.value(cell(columns.population)) {
            Some(value) => value
                .parse::<f64>()
                .map_err(|_| malformed(SOURCE_POPULATION, columns.population))?,
            None => {
                report.missing_values_dropped += 1;
                continue;
            }
        };

        if !seen.insert((country.to_string(), year)) {
            report.duplicates_dropped += 1;
            continue;
        }

        countries.append_value(country);
        iso_codes.append_option(nulls.value(cell(columns.iso_code)));
        years.append_value(year);
        populations.append_value(population);
        report.rows_kept += 1;
    }

    if report.duplicates_dropped > 0 {
        tracing::warn!(
            "Dropped {} duplicate (country, year) rows; first occurrence kept",
            report.duplicates_dropped
        );
    }
    if report.missing_values_dropped > 0 {
        tracing::warn!("Dropped {} rows without a population value", report.missing_values_dropped);
    }

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(countries.finish()),
        Arc::new(iso_codes.finish()),
        Arc::new(years.finish()),
        Arc::new(populations.finish()),
    ];
    let batch = RecordBatch::try_new(population_schema(), arrays)?;

    tracing::info!("Parsed {} of {} rows", report.rows_kept, report.rows_read);
    Ok((batch, report))
}

/// Years are integers; exports sometimes write them as `1960.0`
fn parse_year(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// Population table read from a local CSV file
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Loader options
    config: LoaderConfig,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: LoaderConfig::default(),
        }
    }
}

#[async_trait]
impl wp_core::data::PopulationSource for CsvSource {
    fn schema(&self) -> Arc<Schema> {
        population_schema()
    }

    async fn load(&self) -> anyhow::Result<RecordBatch> {
        tracing::info!("Reading population file {:?}", self.path);

        let path = self.path.clone();
        let config = self.config.clone();
        let (batch, _report) = tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            parse_population_csv(BufReader::new(file), &config)
        })
        .await
        .map_err(DataError::from)??;

        Ok(batch)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PopulationTable;

    const SAMPLE: &str = "\
Country Name,Country Code,Year,Value
Brazil,BRA,2019,211049519
Brazil,BRA,2020,212559409
World,WLD,2020,7794798729
Not classified,,2020,1000
";

    fn parse(text: &str) -> Result<(RecordBatch, ParseReport), DataError> {
        parse_population_csv(text.as_bytes(), &LoaderConfig::default())
    }

    #[test]
    fn renames_columns_and_types_values() {
        let (batch, report) = parse(SAMPLE).unwrap();
        assert_eq!(report.rows_kept, 4);

        let names: Vec<_> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, vec!["País", "Código ISO", "Ano", "População Total"]);

        let table = PopulationTable::try_new(batch).unwrap();
        assert_eq!(table.country(1), "Brazil");
        assert_eq!(table.year(1), 2020);
        assert_eq!(table.population(1), 212_559_409.0);
        assert_eq!(table.iso_code(3), None);
    }

    #[test]
    fn missing_columns_are_fatal() {
        let err = parse("Country Name,Year\nBrazil,2020\n").unwrap_err();
        match err {
            DataError::MissingColumns(missing) => assert_eq!(missing, vec!["Country Code", "Value"]),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn malformed_year_reports_line() {
        let err = parse("Country Name,Country Code,Year,Value\nBrazil,BRA,20x0,1\n").unwrap_err();
        match err {
            DataError::Malformed { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Year");
                assert_eq!(value, "20x0");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn malformed_population_is_fatal_but_blank_is_skipped() {
        assert!(matches!(
            parse("Country Name,Country Code,Year,Value\nBrazil,BRA,2020,lots\n"),
            Err(DataError::Malformed { column: "Value", .. })
        ));

        let (batch, report) = parse("Country Name,Country Code,Year,Value\nBrazil,BRA,2020,\nChile,CHL,2020,19000000\n").unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(report.missing_values_dropped, 1);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let (batch, report) = parse(
            "Country Name,Country Code,Year,Value\nBrazil,BRA,2020,1\nBrazil,BRA,2020,2\nBrazil,BRA,2021,3\n",
        )
        .unwrap();
        assert_eq!(report.duplicates_dropped, 1);

        let table = PopulationTable::try_new(batch).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.population(0), 1.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            parse("Country Name,Country Code,Year,Value\nBrazil,BRA,2020\n"),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn year_accepts_integral_floats() {
        assert_eq!(parse_year("1960"), Some(1960));
        assert_eq!(parse_year("1960.0"), Some(1960));
        assert_eq!(parse_year("1960.5"), None);
    }
}
