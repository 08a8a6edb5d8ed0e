//! Loader configuration

pub mod null_handling;

pub use null_handling::NullConfig;

use serde::{Serialize, Deserialize};

/// How population files are read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter
    pub delimiter: u8,

    /// Null handling configuration
    pub null_config: NullConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_config: NullConfig::default(),
        }
    }
}
