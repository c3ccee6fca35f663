//! Combined chart overlaying several benchmark runs: grouped latency bars per rate and one
//! throughput line per run.

use super::markers::MarkerShape;
use super::plot_error::PlotError;
use super::style::*;
use crate::model::benchmark_sample::BenchmarkSample;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Width of each run's bar, and the offset between neighbouring runs, in category units.
pub const GROUP_BAR_WIDTH: f64 = 0.1;

/// Title of the combined chart.
pub const COMBINED_TITLE: &str = "Combined Benchmark Results";

/// Title entry placed above the per-run latency legend entries.
pub const LATENCY_LEGEND_TITLE: &str = "Latency";

const MARKER_RADIUS: i32 = 5;

/// The samples of one run, as shown on a combined chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSeries {
    /// Legend label (the run directory name)
    pub label: String,
    pub samples: Vec<BenchmarkSample>,
}

impl RunSeries {
    pub fn new(label: impl Into<String>, samples: Vec<BenchmarkSample>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }
}

/// Centre of the latency bar of run `run_index` at category `category`.
pub fn bar_center(category: usize, run_index: usize) -> f64 {
    category as f64 + run_index as f64 * GROUP_BAR_WIDTH
}

/// Draws all runs onto one chart and saves it as a PNG.
///
/// Each run gets one latency bar per rate, offset within the rate's group, and one
/// throughput line on the secondary axis. X-axis tick labels are taken from the rates
/// of the last run. Runs without samples keep their legend entries; if no run has
/// samples, the chart is saved with empty axes.
///
/// # Arguments
/// * `runs` - Runs to overlay, in legend order
/// * `output_path` - Path where the PNG will be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If `runs` is empty or rendering failed
pub fn create_combined_chart(runs: &[RunSeries], output_path: &Path) -> Result<()> {
    if runs.is_empty() {
        return Err(PlotError::InvalidData("No runs to combine".to_string()));
    }

    // Runs without rows still produce a chart, with empty axes.
    let all_samples = || runs.iter().flat_map(|run| run.samples.iter());
    let (_, latency_max) =
        min_max(all_samples().map(|s| s.mean_latency_ms)).unwrap_or((0.0, 0.0));
    let (throughput_min, throughput_max) =
        min_max(all_samples().map(|s| s.throughput)).unwrap_or((0.0, 0.0));

    let categories = runs.iter().map(|run| run.samples.len()).max().unwrap_or(0);
    let group_extra = (runs.len() - 1) as f64 * GROUP_BAR_WIDTH;
    let x_range = category_range(categories, group_extra);
    let latency_top = if latency_max > 0.0 {
        latency_max * 1.1
    } else {
        1.0
    };
    let throughput_range = padded_range(throughput_min, throughput_max, 0.1);

    let labels: Vec<String> = runs
        .last()
        .map(|run| run.samples.iter().map(|s| s.rate.to_string()).collect())
        .unwrap_or_default();
    let palette = viridis_palette(runs.len());

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(COMBINED_TITLE, (FONT_FAMILY, TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), 0.0..latency_top)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?
        .set_secondary_coord(x_range, throughput_range);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(&labels, *x))
        .x_desc(X_AXIS_DESC)
        .y_desc(LATENCY_AXIS_DESC)
        .y_label_style((FONT_FAMILY, LABEL_FONT_SIZE).into_font().color(&LATENCY_COLOR))
        .axis_desc_style((FONT_FAMILY, AXIS_FONT_SIZE))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .configure_secondary_axes()
        .y_desc(THROUGHPUT_AXIS_DESC)
        .label_style((FONT_FAMILY, LABEL_FONT_SIZE).into_font().color(&THROUGHPUT_COLOR))
        .axis_desc_style((FONT_FAMILY, AXIS_FONT_SIZE))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Legend title: a label with no glyph.
    chart
        .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(LATENCY_LEGEND_TITLE)
        .legend(|(x, y)| EmptyElement::at((x, y)));

    let bar_label_style = (FONT_FAMILY, ANNOTATION_FONT_SIZE - 2)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (run_index, (run, &color)) in runs.iter().zip(palette.iter()).enumerate() {
        let half = GROUP_BAR_WIDTH / 2.0;
        chart
            .draw_series(run.samples.iter().enumerate().map(|(category, sample)| {
                let x = bar_center(category, run_index);
                Rectangle::new(
                    [(x - half, 0.0), (x + half, sample.mean_latency_ms)],
                    color.filled(),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(run.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

        chart
            .draw_series(run.samples.iter().enumerate().map(|(category, sample)| {
                EmptyElement::at((bar_center(category, run_index), sample.mean_latency_ms))
                    + Text::new(
                        format_one_decimal(sample.mean_latency_ms),
                        (0, -3),
                        bar_label_style.clone(),
                    )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let points: Vec<(f64, f64)> = run
            .samples
            .iter()
            .enumerate()
            .map(|(category, sample)| (category as f64, sample.throughput))
            .collect();
        let marker = MarkerShape::for_series(run_index);

        chart
            .draw_secondary_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(format!("Throughput: {}", run.label))
            .legend(move |(x, y)| {
                EmptyElement::at((x + 6, y))
                    + Polygon::new(marker.vertices(MARKER_RADIUS - 1), color.filled())
            });

        chart
            .draw_secondary_series(points.iter().map(|&point| {
                EmptyElement::at(point)
                    + Polygon::new(marker.vertices(MARKER_RADIUS), color.filled())
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT_FAMILY, LABEL_FONT_SIZE - 2))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Ensure everything is properly rendered and saved
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
