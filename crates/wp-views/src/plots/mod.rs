//! Chart builders and their views

pub mod bar;
pub mod geo;
pub mod line;
pub mod scatter;
pub mod world_map;

// Utilities
pub mod utils;

// Re-exports
pub use bar::{build_top_population_bar, TopPopulationView};
pub use geo::{build_animated_choropleth, build_choropleth, AnimatedChoroplethView, ChoroplethView};
pub use line::{build_trend_line, TrendLineView};
pub use scatter::{build_year_comparison, YearComparisonView};
pub use world_map::{MapProjection, WorldMap};
