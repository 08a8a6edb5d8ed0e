//! Column names of the working table and their descriptions.
//!
//! The source file uses English headers; everything downstream of the loader
//! uses the display names below.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub const COUNTRY: &str = "País";
pub const ISO_CODE: &str = "Código ISO";
pub const YEAR: &str = "Ano";
pub const POPULATION: &str = "População Total";

pub const SOURCE_COUNTRY: &str = "Country Name";
pub const SOURCE_ISO_CODE: &str = "Country Code";
pub const SOURCE_YEAR: &str = "Year";
pub const SOURCE_POPULATION: &str = "Value";

/// Source header → display name, in schema order.
pub const RENAMES: [(&str, &str); 4] = [
    (SOURCE_COUNTRY, COUNTRY),
    (SOURCE_ISO_CODE, ISO_CODE),
    (SOURCE_YEAR, YEAR),
    (SOURCE_POPULATION, POPULATION),
];

/// Country name of the global aggregate row
pub const WORLD: &str = "World";

/// Length of an ISO Alpha-3 code
pub const ISO_CODE_LEN: usize = 3;

/// Label of a population column qualified by its year, e.g. `População 2020`.
pub fn year_population_label(year: i64) -> String {
    format!("População {}", year)
}

/// Static description of every display column
#[derive(Debug, Clone)]
pub struct ColumnMetadata {
    entries: IndexMap<&'static str, &'static str>,
}

impl ColumnMetadata {
    fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(COUNTRY, "Nome completo do país ou região.");
        entries.insert(ISO_CODE, "Código ISO Alpha-3 que identifica o país.");
        entries.insert(YEAR, "Ano de referência dos dados.");
        entries.insert(POPULATION, "Número estimado de habitantes no país nesse ano.");
        Self { entries }
    }

    /// Description of a column, if known
    pub fn description(&self, column: &str) -> Option<&'static str> {
        self.entries.get(column).copied()
    }

    /// Iterate `(column, description)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub static COLUMN_METADATA: Lazy<ColumnMetadata> = Lazy::new(ColumnMetadata::new);
