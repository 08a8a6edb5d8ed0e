use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Dashboard events
pub mod events {
    use super::Event;
    use crate::filter::FilterState;

    /// Dataset loaded event
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub row_count: usize,
        pub country_rows: usize,
    }

    /// Dataset failed to load
    #[derive(Debug, Clone)]
    pub struct DatasetLoadFailed {
        pub source_name: String,
        pub error: String,
    }

    /// Filter selections changed
    #[derive(Debug, Clone)]
    pub struct FilterChanged {
        pub state: FilterState,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(DatasetLoaded, DatasetLoadFailed, FilterChanged);
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Number of handlers subscribed to `E`
    pub fn subscriber_count<E: Event>(&self) -> usize {
        let type_id = std::any::TypeId::of::<E>();
        self.handlers.lock().get(&type_id).map_or(0, Vec::len)
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event handler built from a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{DatasetLoadFailed, DatasetLoaded};
    use super::*;

    #[test]
    fn handlers_only_see_their_event_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe::<DatasetLoaded>(handler_from_fn(move |event: &dyn Event| {
            if let Some(loaded) = event.as_any().downcast_ref::<DatasetLoaded>() {
                sink.lock().push(loaded.row_count);
            }
        }));

        bus.publish(DatasetLoadFailed {
            source_name: "population.csv".into(),
            error: "404".into(),
        });
        bus.publish(DatasetLoaded {
            source_name: "population.csv".into(),
            row_count: 12,
            country_rows: 10,
        });

        assert_eq!(*seen.lock(), vec![12]);
    }

    #[test]
    fn counts_subscribers_per_event_type() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count::<DatasetLoaded>(), 0);
        bus.subscribe::<DatasetLoaded>(handler_from_fn(|_: &dyn Event| {}));
        bus.subscribe::<DatasetLoaded>(handler_from_fn(|_: &dyn Event| {}));
        assert_eq!(bus.subscriber_count::<DatasetLoaded>(), 2);
        assert_eq!(bus.subscriber_count::<DatasetLoadFailed>(), 0);
    }
}
