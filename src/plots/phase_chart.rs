//! Per-phase dual-axis chart: latency bars against a throughput line.

use super::plot_error::PlotError;
use super::style::*;
use crate::stats::iqr::OutlierSplit;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Width of a latency bar in category units.
const BAR_WIDTH: f64 = 0.35;

/// Latency axis padding as a fraction of the plotted latency range.
const LATENCY_MARGIN: f64 = 0.1;

/// Throughput axis padding, leaves room for the value labels above the points.
const THROUGHPUT_MARGIN: f64 = 0.15;

/// Inset of outlier annotations from the top-right corner of the image, in pixels.
const OUTLIER_INSET: (i32, i32) = (10, 40);
const OUTLIER_LINE_HEIGHT: i32 = 18;

/// Text of the corner annotation for one outlier.
pub fn outlier_annotation(rate: u32, latency_ms: f64) -> String {
    format!("Outlier: {} TPS, {} ms", rate, format_one_decimal(latency_ms))
}

/// Draws the chart of a single phase and saves it as a PNG.
///
/// Only the kept samples of `split` are plotted; each outlier is listed as text in the top
/// right corner instead.
///
/// # Arguments
/// * `split` - Phase samples split into kept values and latency outliers
/// * `title` - Chart title displayed at the top of the plot
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If there is nothing to plot or rendering failed
pub fn create_phase_chart(split: &OutlierSplit, title: &str, output_path: &Path) -> Result<()> {
    let kept = &split.kept;
    if kept.is_empty() {
        return Err(PlotError::InvalidData(
            "Phase has no samples to plot".to_string(),
        ));
    }

    let (latency_min, latency_max) = min_max(kept.iter().map(|s| s.mean_latency_ms))
        .ok_or_else(|| PlotError::InvalidData("No latency values".to_string()))?;
    let (throughput_min, throughput_max) = min_max(kept.iter().map(|s| s.throughput))
        .ok_or_else(|| PlotError::InvalidData("No throughput values".to_string()))?;

    let latency_range = padded_range(latency_min, latency_max, LATENCY_MARGIN);
    let throughput_range = padded_range(throughput_min, throughput_max, THROUGHPUT_MARGIN);
    let x_range = category_range(kept.len(), 0.0);
    let labels: Vec<String> = kept.iter().map(|s| s.rate.to_string()).collect();

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT_FAMILY, TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), latency_range.clone())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?
        .set_secondary_coord(x_range, throughput_range);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(labels.len())
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

    // Latency bars rise from the bottom of the (padded) latency axis.
    let bar_floor = latency_range.start;
    chart
        .draw_series(kept.iter().enumerate().map(|(index, sample)| {
            let x = index as f64;
            Rectangle::new(
                [
                    (x - BAR_WIDTH / 2.0, bar_floor),
                    (x + BAR_WIDTH / 2.0, sample.mean_latency_ms),
                ],
                LATENCY_COLOR.filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let bar_label_style = (FONT_FAMILY, ANNOTATION_FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(kept.iter().enumerate().map(|(index, sample)| {
            EmptyElement::at((index as f64, sample.mean_latency_ms))
                + Text::new(
                    format_one_decimal(sample.mean_latency_ms),
                    (0, -2),
                    bar_label_style.clone(),
                )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let throughput_points: Vec<(f64, f64)> = kept
        .iter()
        .enumerate()
        .map(|(index, sample)| (index as f64, sample.throughput))
        .collect();

    chart
        .draw_secondary_series(LineSeries::new(
            throughput_points.iter().copied(),
            THROUGHPUT_COLOR.stroke_width(2),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(THROUGHPUT_AXIS_DESC)
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], THROUGHPUT_COLOR.stroke_width(2))
        });

    chart
        .draw_secondary_series(
            throughput_points
                .iter()
                .map(|&point| Circle::new(point, 4, THROUGHPUT_COLOR.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let point_label_style = (FONT_FAMILY, ANNOTATION_FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_secondary_series(throughput_points.iter().map(|&(x, y)| {
            EmptyElement::at((x, y))
                + Text::new(format_one_decimal(y), (0, -10), point_label_style.clone())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT_FAMILY, LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Outliers are listed in the top-right corner, one line each.
    let outlier_style = (FONT_FAMILY, ANNOTATION_FONT_SIZE)
        .into_font()
        .color(&RED)
        .pos(Pos::new(HPos::Right, VPos::Top));
    let right_edge = CHART_SIZE.0 as i32 - OUTLIER_INSET.0;
    for (index, outlier) in split.outliers.iter().enumerate() {
        let y = OUTLIER_INSET.1 + index as i32 * OUTLIER_LINE_HEIGHT;
        root.draw(&Text::new(
            outlier_annotation(outlier.rate, outlier.mean_latency_ms),
            (right_edge, y),
            outlier_style.clone(),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    // Ensure everything is properly rendered and saved
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::benchmark_sample::BenchmarkSample;
    use tempfile::tempdir;

    fn split_of(latencies: &[f64]) -> OutlierSplit {
        let samples: Vec<BenchmarkSample> = latencies
            .iter()
            .enumerate()
            .map(|(index, &latency)| BenchmarkSample {
                rate: (index as u32 + 1) * 40,
                throughput: (index as f64 + 1.0) * 39.0,
                mean_latency_ms: latency,
            })
            .collect();
        OutlierSplit::from_samples(&samples)
    }

    #[test]
    fn outlier_annotation_text() {
        assert_eq!(outlier_annotation(440, 1234.56), "Outlier: 440 TPS, 1234.6 ms");
        assert_eq!(outlier_annotation(40, 2.0), "Outlier: 40 TPS, 2.0 ms");
    }

    #[test]
    fn empty_phase_is_rejected_before_drawing() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("bank_chart.png");

        let result = create_phase_chart(&OutlierSplit::default(), "Bank", &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
        assert!(!output_path.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_phase_chart_with_outlier() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("bank_chart.png");

        let split = split_of(&[10.0, 10.5, 11.0, 10.2, 250.0]);
        assert_eq!(split.outliers.len(), 1);

        create_phase_chart(&split, "Bank Benchmark Results for results", &output_path).unwrap();
        assert!(output_path.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_single_sample_chart() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("bank_chart.png");

        create_phase_chart(&split_of(&[3.0]), "Bank", &output_path).unwrap();
        assert!(output_path.exists());
    }
}
