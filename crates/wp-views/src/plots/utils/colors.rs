//! Color utilities for plots

use egui::Color32;

use crate::spec::ColorScale;

/// Get a categorical color from a palette
pub fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(99, 110, 250),   // Blue
        Color32::from_rgb(239, 85, 59),    // Red
        Color32::from_rgb(0, 204, 150),    // Green
        Color32::from_rgb(171, 99, 250),   // Purple
        Color32::from_rgb(255, 161, 90),   // Orange
        Color32::from_rgb(25, 211, 243),   // Cyan
    ];
    PALETTE[index % PALETTE.len()]
}

/// Plasma color map
pub fn plasma_color(t: f32) -> Color32 {
    const STOPS: [(f32, [f32; 3]); 5] = [
        (0.00, [13.0, 8.0, 135.0]),
        (0.25, [126.0, 3.0, 168.0]),
        (0.50, [204.0, 71.0, 120.0]),
        (0.75, [248.0, 149.0, 64.0]),
        (1.00, [240.0, 249.0, 33.0]),
    ];

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let upper = STOPS.iter().position(|(at, _)| *at >= t).unwrap_or(STOPS.len() - 1).max(1);
    let (t0, c0) = STOPS[upper - 1];
    let (t1, c1) = STOPS[upper];
    let s = (t - t0) / (t1 - t0);
    let mix = |i: usize| (c0[i] + (c1[i] - c0[i]) * s).round() as u8;

    Color32::from_rgb(mix(0), mix(1), mix(2))
}

/// Color of a scale at position `t` in `[0, 1]`
pub fn scale_color(scale: ColorScale, t: f32) -> Color32 {
    match scale {
        ColorScale::Plasma => plasma_color(t),
    }
}

/// Position of `value` inside `range`, `0.5` for a degenerate range
pub fn normalize(value: f64, range: (f64, f64)) -> f32 {
    let (lo, hi) = range;
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plasma_endpoints() {
        assert_eq!(plasma_color(0.0), Color32::from_rgb(13, 8, 135));
        assert_eq!(plasma_color(1.0), Color32::from_rgb(240, 249, 33));
        assert_eq!(plasma_color(-3.0), plasma_color(0.0));
        assert_eq!(plasma_color(f32::NAN), plasma_color(0.0));
        assert_eq!(plasma_color(0.5), Color32::from_rgb(204, 71, 120));
    }

    #[test]
    fn normalize_clamps_and_handles_flat_ranges() {
        assert_eq!(normalize(5.0, (0.0, 10.0)), 0.5);
        assert_eq!(normalize(20.0, (0.0, 10.0)), 1.0);
        assert_eq!(normalize(7.0, (7.0, 7.0)), 0.5);
    }
}
