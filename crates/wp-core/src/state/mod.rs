use std::time::Duration;

/// Address of the World Bank population table published by DataHub
pub const DEFAULT_SOURCE_URL: &str = "https://datahub.io/core/population/r/population.csv";

/// Human-facing page of the dataset, linked from the header
pub const DATASET_PAGE_URL: &str = "https://datahub.io/core/population";

/// Dashboard settings
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV resource fetched on every start
    pub source_url: String,

    /// Year selected on a fresh session (or the nearest available one)
    pub preferred_year: i64,

    /// Number of bars in the ranking chart
    pub top_n: usize,

    /// Theme settings
    pub theme: ThemeSettings,

    /// Animation settings
    pub animation: AnimationSettings,
}

/// Theme settings
#[derive(Debug, Clone)]
pub struct ThemeSettings {
    /// Whether to use dark mode
    pub dark_mode: bool,
}

/// Playback settings of the animated map
#[derive(Debug, Clone)]
pub struct AnimationSettings {
    /// Time each year stays on screen at 1x speed
    pub frame_interval: Duration,

    /// Restart from the first year after the last one
    pub looping: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            preferred_year: 2020,
            top_n: 5,
            theme: ThemeSettings {
                dark_mode: true,
            },
            animation: AnimationSettings {
                frame_interval: Duration::from_millis(400),
                looping: true,
            },
        }
    }
}
