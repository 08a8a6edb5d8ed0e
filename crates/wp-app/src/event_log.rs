//! Tracing subscribers for the dashboard events

use tracing::{debug, error, info};
use wp_core::events::events::{DatasetLoadFailed, DatasetLoaded, FilterChanged};
use wp_core::events::{handler_from_fn, Event, EventBus};

/// Log dataset and filter events as they are published
pub fn subscribe_logging(event_bus: &EventBus) {
    event_bus.subscribe::<DatasetLoaded>(handler_from_fn(|event: &dyn Event| {
        if let Some(loaded) = event.as_any().downcast_ref::<DatasetLoaded>() {
            info!(
                "Dataset {} ready: {} rows, {} country rows",
                loaded.source_name, loaded.row_count, loaded.country_rows
            );
        }
    }));
    event_bus.subscribe::<DatasetLoadFailed>(handler_from_fn(|event: &dyn Event| {
        if let Some(failed) = event.as_any().downcast_ref::<DatasetLoadFailed>() {
            error!("Dataset {} unavailable: {}", failed.source_name, failed.error);
        }
    }));
    event_bus.subscribe::<FilterChanged>(handler_from_fn(|event: &dyn Event| {
        if let Some(changed) = event.as_any().downcast_ref::<FilterChanged>() {
            let state = &changed.state;
            debug!(
                "Filter changed: year={}, country='{}', comparison={:?}/{:?}",
                state.selected_year, state.selected_country, state.comparison_year_a, state.comparison_year_b
            );
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wp_core::{FilterController, FilterDomain};

    #[test]
    fn every_dashboard_event_is_logged() {
        let bus = EventBus::new();
        subscribe_logging(&bus);

        assert_eq!(bus.subscriber_count::<DatasetLoaded>(), 1);
        assert_eq!(bus.subscriber_count::<DatasetLoadFailed>(), 1);
        assert_eq!(bus.subscriber_count::<FilterChanged>(), 1);
    }

    #[test]
    fn filter_changes_reach_the_logger() {
        let bus = Arc::new(EventBus::new());
        subscribe_logging(&bus);
        let filter = FilterController::new(bus.clone());
        filter.reset(
            FilterDomain::new(vec![2019, 2020], vec!["Brazil".to_string(), "Chile".to_string()]),
            2020,
        );
        filter.set_country("Chile").unwrap();
        assert_eq!(filter.snapshot().unwrap().selected_country, "Chile");
    }
}
