//! Filter controller implementation

use super::{FilterDomain, FilterState};
use crate::events::{events::FilterChanged, EventBus};
use std::sync::Arc;
use parking_lot::RwLock;

/// Filter state stored internally
#[derive(Debug, Clone, Default)]
struct ControllerState {
    domain: FilterDomain,
    filter: Option<FilterState>,
}

/// Holds the current selections of a session and validates every change
///
/// Widgets write through the controller; derivations only ever see the
/// immutable [`FilterState`] returned by [`FilterController::snapshot`].
pub struct FilterController {
    state: Arc<RwLock<ControllerState>>,
    event_bus: Arc<EventBus>,
}

impl FilterController {
    /// Create a new controller with an empty domain
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ControllerState::default())),
            event_bus,
        }
    }

    /// Replace the domain (e.g., when a dataset finishes loading) and reset
    /// the selections to the session defaults
    pub fn reset(&self, domain: FilterDomain, preferred_year: i64) {
        let mut state = self.state.write();
        state.filter = FilterState::defaults_for(&domain, preferred_year);
        state.domain = domain;

        if state.filter.is_none() {
            tracing::warn!("Filter domain is empty; no selections available");
        }

        drop(state);
        self.notify();
    }

    /// Current selections
    pub fn snapshot(&self) -> Option<FilterState> {
        self.state.read().filter.clone()
    }

    /// Current domain
    pub fn domain(&self) -> FilterDomain {
        self.state.read().domain.clone()
    }

    /// Select a year; any value inside the loaded range is accepted, even
    /// one the data has no rows for
    pub fn set_year(&self, year: i64) -> Result<(), String> {
        self.update(|domain, filter| {
            match (domain.earliest_year(), domain.latest_year()) {
                (Some(min), Some(max)) if (min..=max).contains(&year) => {
                    filter.selected_year = year;
                    Ok(())
                }
                (Some(min), Some(max)) => {
                    Err(format!("Year {} out of range ({}..={})", year, min, max))
                }
                _ => Err("No years loaded".to_string()),
            }
        })
    }

    /// Step to the next available year
    pub fn next_year(&self) -> Result<(), String> {
        self.update(|domain, filter| {
            match domain.years.iter().find(|y| **y > filter.selected_year) {
                Some(year) => {
                    filter.selected_year = *year;
                    Ok(())
                }
                None => Err("Already at last year".to_string()),
            }
        })
    }

    /// Step to the previous available year
    pub fn previous_year(&self) -> Result<(), String> {
        self.update(|domain, filter| {
            match domain.years.iter().rev().find(|y| **y < filter.selected_year) {
                Some(year) => {
                    filter.selected_year = *year;
                    Ok(())
                }
                None => Err("Already at first year".to_string()),
            }
        })
    }

    /// Select a country from the domain
    pub fn set_country(&self, country: &str) -> Result<(), String> {
        self.update(|domain, filter| {
            if domain.contains_country(country) {
                filter.selected_country = country.to_string();
                Ok(())
            } else {
                Err(format!("Country '{}' not found", country))
            }
        })
    }

    /// Select the two comparison years; `None` leaves a side unset
    pub fn set_comparison_years(&self, year_a: Option<i64>, year_b: Option<i64>) -> Result<(), String> {
        self.update(|domain, filter| {
            for year in [year_a, year_b].into_iter().flatten() {
                if !domain.contains_year(year) {
                    return Err(format!("Year {} not available for comparison", year));
                }
            }
            filter.comparison_year_a = year_a;
            filter.comparison_year_b = year_b;
            Ok(())
        })
    }

    /// Apply a validated mutation and notify only when something changed
    fn update<F>(&self, mutate: F) -> Result<(), String>
    where
        F: FnOnce(&FilterDomain, &mut FilterState) -> Result<(), String>,
    {
        let mut state = self.state.write();
        let ControllerState { domain, filter } = &mut *state;
        let filter = filter.as_mut().ok_or_else(|| "No dataset loaded".to_string())?;

        let before = filter.clone();
        mutate(domain, filter)?;
        let changed = *filter != before;

        drop(state);
        if changed {
            self.notify();
        }
        Ok(())
    }

    fn notify(&self) {
        if let Some(state) = self.snapshot() {
            self.event_bus.publish(FilterChanged { state });
        }
    }
}
