//! Background load of the dataset into the state shared with the UI

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{error, info};
use wp_core::data::PopulationSource;
use wp_core::events::events::{DatasetLoadFailed, DatasetLoaded};
use wp_core::events::EventBus;
use wp_core::FilterController;
use wp_data::LoadedDataset;
use wp_ui::LoadStatus;

/// What the load task writes and the UI thread reads
#[derive(Clone)]
pub struct LoadState {
    pub status: Arc<RwLock<LoadStatus>>,
    pub dataset: Arc<RwLock<Option<Arc<LoadedDataset>>>>,
}

impl LoadState {
    pub fn new() -> Self {
        Self {
            status: Arc::new(RwLock::new(LoadStatus::loading())),
            dataset: Arc::new(RwLock::new(None)),
        }
    }

    pub fn dataset(&self) -> Option<Arc<LoadedDataset>> {
        self.dataset.read().clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.status.read().clone()
    }

    /// Replace the status with a fatal error
    pub fn fail(&self, message: impl Into<String>) {
        *self.status.write() = LoadStatus::Failed { message: message.into() };
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new()
    }
}

/// Load `source`, reset the filter to the new domain and publish the outcome
pub async fn load_into(
    source: Arc<dyn PopulationSource>,
    state: LoadState,
    filter: Arc<FilterController>,
    event_bus: Arc<EventBus>,
    preferred_year: i64,
) {
    info!("Loading population data from {}", source.source_name());

    match LoadedDataset::load(source.as_ref()).await {
        Ok(dataset) => {
            let frames = &dataset.frames;
            event_bus.publish(DatasetLoaded {
                source_name: dataset.source_name.clone(),
                row_count: frames.all().num_rows(),
                country_rows: frames.countries_only().num_rows(),
            });

            let summary = dataset.summary();
            filter.reset(frames.domain(), preferred_year);
            *state.dataset.write() = Some(Arc::new(dataset));
            *state.status.write() = LoadStatus::Ready { summary };
        }
        Err(e) => {
            error!("Failed to load {}: {:#}", source.source_name(), e);
            event_bus.publish(DatasetLoadFailed {
                source_name: source.source_name().to_string(),
                error: format!("{:#}", e),
            });
            state.fail(format!("{:#}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wp_data::CsvSource;

    fn setup() -> (LoadState, Arc<FilterController>, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let filter = Arc::new(FilterController::new(bus.clone()));
        (LoadState::new(), filter, bus)
    }

    #[tokio::test]
    async fn successful_load_resets_the_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("population.csv");
        fs::write(
            &path,
            "Country Name,Country Code,Year,Value\n\
             Brazil,BRA,2019,211049527\n\
             Brazil,BRA,2021,214326223\n\
             World,WLD,2021,7888408686\n",
        )
        .unwrap();

        let (state, filter, bus) = setup();
        load_into(Arc::new(CsvSource::new(path)), state.clone(), filter.clone(), bus, 2020).await;

        assert!(state.status().is_ready());
        assert_eq!(state.dataset().unwrap().frames.all().num_rows(), 3);

        let snapshot = filter.snapshot().unwrap();
        // 2020 is missing; the earlier of the two nearest years wins
        assert_eq!(snapshot.selected_year, 2019);
        assert_eq!(snapshot.selected_country, "Brazil");
    }

    #[tokio::test]
    async fn failed_load_is_reported() {
        let dir = TempDir::new().unwrap();
        let (state, filter, bus) = setup();
        let source = CsvSource::new(dir.path().join("missing.csv"));
        load_into(Arc::new(source), state.clone(), filter.clone(), bus, 2020).await;

        assert!(matches!(state.status(), LoadStatus::Failed { .. }));
        assert!(state.dataset().is_none());
        assert!(filter.snapshot().is_none());
    }
}
