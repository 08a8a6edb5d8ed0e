//! Chart builders and egui views of the population dashboard

mod space_view;
mod viewport;
pub mod dashboard;
pub mod export;
pub mod plots;
pub mod spec;
pub mod stats;
pub mod tables;

#[cfg(test)]
pub(crate) mod fixtures;

pub use space_view::{SpaceView, SpaceViewId};
pub use viewport::Viewport;
pub use dashboard::DashboardModel;
pub use spec::{Notice, NoticeLevel, ViewOutput};
pub use stats::{MetricsBlock, MetricsPanel};
pub use tables::RawDataView;

use std::sync::Arc;
use std::time::Duration;
use parking_lot::RwLock;
use wp_core::{DashboardConfig, FilterController};
use wp_data::{DataError, PopulationFrames};

/// Playback state of the animated map
#[derive(Debug, Clone)]
pub struct TimeControl {
    pub playing: bool,
    pub speed: f64,
    pub looping: bool,
    /// Index into the animation frames
    pub frame_index: usize,
    /// Time spent on the current frame
    elapsed: Duration,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            playing: false,
            speed: 1.0,
            looping: true,
            frame_index: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl TimeControl {
    /// Advance playback by `dt`; returns true when the frame changed
    pub fn advance(&mut self, dt: Duration, frame_count: usize, interval: Duration) -> bool {
        if !self.playing || frame_count == 0 || interval.is_zero() {
            return false;
        }

        self.elapsed += dt.mul_f64(self.speed.max(0.0));
        let mut changed = false;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            changed |= self.step_forward(frame_count);
            if !self.playing {
                self.elapsed = Duration::ZERO;
                break;
            }
        }
        changed
    }

    /// Move to the next frame, wrapping or stopping at the end
    pub fn step_forward(&mut self, frame_count: usize) -> bool {
        if frame_count == 0 {
            return false;
        }
        if self.frame_index + 1 < frame_count {
            self.frame_index += 1;
            true
        } else if self.looping {
            self.frame_index = 0;
            frame_count > 1
        } else {
            self.playing = false;
            false
        }
    }

    pub fn step_back(&mut self) -> bool {
        if self.frame_index > 0 {
            self.frame_index -= 1;
            true
        } else {
            false
        }
    }

    /// Keep the frame index valid for a (possibly new) frame count
    pub fn clamp(&mut self, frame_count: usize) {
        self.frame_index = self.frame_index.min(frame_count.saturating_sub(1));
    }
}

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Model of the current filter snapshot, once a dataset is loaded
    pub dashboard: Arc<RwLock<Option<Arc<DashboardModel>>>>,

    /// Selections of the session
    pub filter: Arc<FilterController>,

    /// Animated map playback
    pub time_control: Arc<RwLock<TimeControl>>,

    /// Dashboard settings
    pub config: Arc<DashboardConfig>,
}

impl ViewerContext {
    pub fn new(filter: Arc<FilterController>, config: DashboardConfig) -> Self {
        let time_control = TimeControl {
            looping: config.animation.looping,
            ..TimeControl::default()
        };

        Self {
            dashboard: Arc::new(RwLock::new(None)),
            filter,
            time_control: Arc::new(RwLock::new(time_control)),
            config: Arc::new(config),
        }
    }

    /// Current model
    pub fn model(&self) -> Option<Arc<DashboardModel>> {
        self.dashboard.read().clone()
    }

    /// Rebuild the model when the filter snapshot differs from the one it
    /// was built for; returns true when a new model was installed
    pub fn refresh(&self, frames: &PopulationFrames) -> Result<bool, DataError> {
        let Some(filter) = self.filter.snapshot() else {
            return Ok(false);
        };

        let up_to_date = self
            .dashboard
            .read()
            .as_ref()
            .map_or(false, |model| model.filter == filter);
        if up_to_date {
            return Ok(false);
        }

        let model = DashboardModel::build(frames, &filter, &self.config)?;
        if let Some(animated) = model.animated_map.chart() {
            self.time_control.write().clamp(animated.frames.len());
        }
        *self.dashboard.write() = Some(Arc::new(model));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wp_core::events::EventBus;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn playback_wraps_when_looping() {
        let mut time = TimeControl { playing: true, ..TimeControl::default() };
        assert!(time.advance(SECOND, 3, SECOND));
        assert!(time.advance(SECOND, 3, SECOND));
        assert_eq!(time.frame_index, 2);
        assert!(time.advance(SECOND, 3, SECOND));
        assert_eq!(time.frame_index, 0);
    }

    #[test]
    fn playback_stops_at_the_end_without_looping() {
        let mut time = TimeControl { playing: true, looping: false, frame_index: 1, ..TimeControl::default() };
        assert!(!time.advance(SECOND * 5, 2, SECOND));
        assert!(!time.playing);
        assert_eq!(time.frame_index, 1);
    }

    #[test]
    fn paused_playback_does_not_move() {
        let mut time = TimeControl::default();
        assert!(!time.advance(SECOND * 10, 3, SECOND));
        assert_eq!(time.frame_index, 0);
        assert!(!time.step_back());
        assert!(time.step_forward(3));
        assert!(time.step_back());
    }

    #[test]
    fn refresh_rebuilds_only_on_filter_change() {
        let frames = fixtures::frames();
        let filter = Arc::new(FilterController::new(Arc::new(EventBus::new())));
        filter.reset(frames.domain(), 2020);

        let ctx = ViewerContext::new(filter.clone(), DashboardConfig::default());
        assert!(ctx.model().is_none());
        assert!(ctx.refresh(&frames).unwrap());
        assert!(!ctx.refresh(&frames).unwrap());

        filter.set_country("Brazil").unwrap();
        assert!(ctx.refresh(&frames).unwrap());
        assert_eq!(ctx.model().unwrap().filter.selected_country, "Brazil");
    }

    #[test]
    fn refresh_without_selections_is_a_no_op() {
        let filter = Arc::new(FilterController::new(Arc::new(EventBus::new())));
        let ctx = ViewerContext::new(filter, DashboardConfig::default());
        assert!(!ctx.refresh(&fixtures::frames()).unwrap());
        assert!(ctx.model().is_none());
    }
}
