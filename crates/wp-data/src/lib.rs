//! Data loading and derivations for the population dashboard

pub mod comparison;
pub mod config;
pub mod dataset;
pub mod frames;
pub mod metrics;
pub mod schema;
pub mod sources;
pub mod table;

use arrow::error::ArrowError;
use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use comparison::{compare_years, ComparisonRow, YearComparison};
pub use config::{LoaderConfig, NullConfig};
pub use dataset::LoadedDataset;
pub use frames::PopulationFrames;
pub use metrics::{CountryPopulation, HeadlineMetrics};
pub use sources::{CsvSource, HttpSource, ParseReport};
pub use table::{PopulationRecord, PopulationTable};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed value {value:?} in column '{column}' at line {line}")]
    Malformed {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Unexpected table schema: {0}")]
    Schema(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
