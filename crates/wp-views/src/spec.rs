//! Chart specifications
//!
//! Builders turn the prepared frames and a filter snapshot into these plain
//! values; the egui views only ever draw from them. All of them serialize to
//! JSON for the "copy specification" action.

use serde::Serialize;

/// Result of a chart builder: a chart, or the message shown in its place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ViewOutput<T> {
    Chart(T),
    Notice(Notice),
}

impl<T> ViewOutput<T> {
    pub fn chart(&self) -> Option<&T> {
        match self {
            ViewOutput::Chart(chart) => Some(chart),
            ViewOutput::Notice(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ViewOutput::Chart(_) => None,
            ViewOutput::Notice(notice) => Some(notice),
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, ViewOutput::Chart(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Info,
}

/// Message replacing a chart that has nothing to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Population of one country over the years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// `(year, population)`, ascending by year
    pub points: Vec<(i64, f64)>,
}

/// How a categorical axis orders its categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Data order
    Trace,
    /// Smallest total first, so the largest bar ends up on top
    TotalAscending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub country: String,
    pub population: f64,
}

/// Horizontal ranking bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub value_label: String,
    pub category_label: String,
    /// Largest population first
    pub bars: Vec<BarEntry>,
    pub category_order: CategoryOrder,
}

impl BarChartSpec {
    /// Bars in the order they are stacked on the category axis, bottom first
    pub fn axis_order(&self) -> Vec<&BarEntry> {
        let mut bars: Vec<&BarEntry> = self.bars.iter().collect();
        if self.category_order == CategoryOrder::TotalAscending {
            bars.sort_by(|a, b| a.population.total_cmp(&b.population));
        }
        bars
    }
}

/// Sequential color scale of the maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Plasma,
}

/// One shaded region, addressed by its ISO code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub iso_code: String,
    /// Hover label
    pub country: String,
    pub population: f64,
}

/// Single-year choropleth map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethSpec {
    pub title: String,
    pub value_label: String,
    pub color_scale: ColorScale,
    /// Population mapped to the two ends of the color scale
    pub value_range: (f64, f64),
    pub regions: Vec<Region>,
}

/// Regions of one animation step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethFrame {
    pub year: i64,
    pub regions: Vec<Region>,
}

/// Choropleth with one frame per year and a color range shared by all frames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimatedChoroplethSpec {
    pub title: String,
    pub value_label: String,
    pub color_scale: ColorScale,
    pub value_range: (f64, f64),
    /// Ascending by year
    pub frames: Vec<ChoroplethFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Hover label
    pub country: String,
    pub x: f64,
    pub y: f64,
}

/// Population in one year plotted against another
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

/// Smallest and largest value of a sequence, or `(0, 0)` when it is empty
pub(crate) fn value_range<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .fold(None, |range: Option<(f64, f64)>, v| match range {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 0.0))
}
