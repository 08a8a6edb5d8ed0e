//! A loaded and prepared population dataset

use std::time::{Duration, Instant};
use chrono::{DateTime, Utc};
use wp_core::data::PopulationSource;

use crate::frames::PopulationFrames;
use crate::table::PopulationTable;

/// Frames of one successful load plus where and when they came from
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub source_name: String,
    pub frames: PopulationFrames,
    pub loaded_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl LoadedDataset {
    /// Load `source` and derive the country frames
    ///
    /// Any failure is fatal; there is no partial dataset.
    pub async fn load(source: &dyn PopulationSource) -> anyhow::Result<Self> {
        let started = Instant::now();
        let batch = source.load().await?;
        let table = PopulationTable::try_new(batch)?;
        let frames = PopulationFrames::prepare(table)?;
        let elapsed = started.elapsed();

        tracing::info!(
            "Loaded {} rows ({} country rows) from {} in {}",
            frames.all().num_rows(),
            frames.countries_only().num_rows(),
            source.source_name(),
            humantime::format_duration(round_to_millis(elapsed))
        );

        Ok(Self {
            source_name: source.source_name().to_string(),
            frames,
            loaded_at: Utc::now(),
            elapsed,
        })
    }

    /// Human readable load summary for the status bar
    pub fn summary(&self) -> String {
        format!(
            "{} · {} linhas · carregado {} em {}",
            self.source_name,
            self.frames.all().num_rows(),
            self.loaded_at.format("%Y-%m-%d %H:%M UTC"),
            humantime::format_duration(round_to_millis(self.elapsed))
        )
    }
}

fn round_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis() as u64)
}
