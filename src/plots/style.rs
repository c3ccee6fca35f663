//! Shared chart styling: geometry, colours, axis helpers and label formatting.

use plotters::prelude::*;
use std::ops::Range;

/// Output resolution of every chart (width, height) in pixels.
pub const CHART_SIZE: (u32, u32) = (1000, 500);

/// Colour of the latency axis and single-run latency bars.
pub const LATENCY_COLOR: RGBColor = RGBColor(214, 39, 40);

/// Colour of the throughput axis and single-run throughput line.
pub const THROUGHPUT_COLOR: RGBColor = RGBColor(31, 119, 180);

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_FONT_SIZE: i32 = 24;
pub const AXIS_FONT_SIZE: i32 = 16;
pub const LABEL_FONT_SIZE: i32 = 14;
pub const ANNOTATION_FONT_SIZE: i32 = 12;

pub const X_AXIS_DESC: &str = "Transaction Arrival Rate (TPS)";
pub const LATENCY_AXIS_DESC: &str = "Latency (ms)";
pub const THROUGHPUT_AXIS_DESC: &str = "Throughput (tps)";

/// Formats a value rounded to one decimal place, as used for all chart annotations.
pub fn format_one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Axis range around `min..max` with a margin on both sides.
///
/// A zero-width input is padded by `fraction` of the value's magnitude instead (or by 1.0
/// for zero) so the resulting axis never collapses.
///
/// # Arguments
/// * `min` - Smallest plotted value
/// * `max` - Largest plotted value
/// * `fraction` - Margin as a fraction of the span
///
/// # Returns
/// `(min - m)..(max + m)` where `m = (max - min) * fraction`
pub fn padded_range(min: f64, max: f64, fraction: f64) -> Range<f64> {
    let span = max - min;
    let margin = if span > 0.0 {
        span * fraction
    } else if min != 0.0 {
        min.abs() * fraction
    } else {
        1.0
    };

    (min - margin)..(max + margin)
}

/// Minimum and maximum of the values, or [`None`] if there are none.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// X range covering `count` categories centred on `0..count`, plus `extra` to the right
/// for grouped bars.
pub fn category_range(count: usize, extra: f64) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5 + extra)
}

/// Tick label for a category axis: the label at integral positions, nothing in between.
pub fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }

    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Capitalises the first character of a phase name for chart titles (`bank` -> `Bank`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Evenly samples the viridis colour map, one colour per series.
///
/// # Arguments
/// * `count` - Number of series to colour
///
/// # Returns
/// `count` colours from the dark end (first series) to the light end (last series)
pub fn viridis_palette(count: usize) -> Vec<RGBColor> {
    let map = ViridisRGB {};
    (0..count)
        .map(|index| {
            let t = if count > 1 {
                index as f32 / (count - 1) as f32
            } else {
                0.0
            };
            map.get_color(t)
        })
        .collect()
}
