pub mod csv_source;
pub mod http_source;

pub use csv_source::{parse_population_csv, CsvSource, ParseReport};
pub use http_source::HttpSource;
