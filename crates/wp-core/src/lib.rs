//! Core functionality for the population dashboard
//!
//! This crate provides the shared vocabulary of the dashboard: column names,
//! filter state, settings, events and the data source seam.

pub mod columns;
pub mod events;
pub mod filter;
pub mod state;

// Re-export commonly used types
pub use columns::{ColumnMetadata, COLUMN_METADATA};
pub use filter::{FilterController, FilterDomain, FilterState};
pub use state::DashboardConfig;
pub use data::PopulationSource;

pub mod data {
    use std::sync::Arc;

    /// Trait for population data sources
    ///
    /// Implementations return the full table already renamed to the display
    /// schema (see [`crate::columns`]).
    #[async_trait::async_trait]
    pub trait PopulationSource: Send + Sync {
        /// Get the schema produced by this source
        fn schema(&self) -> Arc<arrow::datatypes::Schema>;

        /// Load the whole table
        async fn load(&self) -> anyhow::Result<arrow::record_batch::RecordBatch>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
