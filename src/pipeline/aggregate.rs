//! Aggregation of raw per-rate results into per-phase CSVs and charts.
//!
//! For every phase of the plan this:
//! - Reads `<phase>_<rate>rps.json` for each configured rate, skipping absent files
//! - Writes all samples (outliers included) to `<phase>_results.csv`
//! - Plots the non-outlier samples to `<phase>_chart.png`

use crate::io::csv_store::{write_phase_csv, CsvStoreError};
use crate::io::json_reader::{collect_phase, ReadError};
use crate::model::benchmark_sample::PhaseResultSet;
use crate::model::phase_plan::{PhasePlan, PhaseSpec};
use crate::plots::phase_chart::create_phase_chart;
use crate::plots::plot_error::PlotError;
use crate::plots::style::capitalize;
use crate::stats::iqr::OutlierSplit;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Reading error: {0}")]
    Read(#[from] ReadError),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvStoreError),

    #[error("Chart generation error: {0}")]
    Plot(#[from] PlotError),
}

type Result<T> = core::result::Result<T, AggregateError>;

/// Settings of an aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory containing the raw results; outputs are written here too
    pub results_dir: PathBuf,
    /// Phases and rates to look for
    pub plan: PhasePlan,
    /// Set to `false` to only write CSVs
    pub render_charts: bool,
}

impl AggregateOptions {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            plan: PhasePlan::default(),
            render_charts: true,
        }
    }
}

/// What was produced for a single phase.
#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub set: PhaseResultSet,
    pub split: OutlierSplit,
    pub csv_path: PathBuf,
    /// [`None`] if charts were disabled or the phase had no samples
    pub chart_path: Option<PathBuf>,
}

/// Chart title of a phase, e.g. `Bank Benchmark Results for results/run-a`.
pub fn phase_chart_title(phase: &str, results_dir: &Path) -> String {
    format!(
        "{} Benchmark Results for {}",
        capitalize(phase),
        results_dir.display()
    )
}

/// Aggregates a single phase.
pub fn aggregate_phase(
    results_dir: &Path,
    phase: &PhaseSpec,
    render_charts: bool,
) -> Result<PhaseOutcome> {
    let set = collect_phase(results_dir, phase)?;

    let csv_path = results_dir.join(phase.csv_file_name());
    write_phase_csv(&set, &csv_path)?;
    info!("Saved {}", csv_path.display());

    let split = OutlierSplit::from_result_set(&set);
    if let Some(bounds) = &split.bounds {
        debug!(
            phase = %phase.name,
            q1 = bounds.q1,
            q3 = bounds.q3,
            lower = bounds.lower,
            upper = bounds.upper,
            outliers = split.outliers.len(),
            "latency fences"
        );
    }

    let chart_path = if !render_charts {
        None
    } else if set.is_empty() {
        warn!("No samples for phase '{}', skipping chart", phase.name);
        None
    } else {
        let chart_path = results_dir.join(phase.chart_file_name());
        let title = phase_chart_title(&phase.name, results_dir);
        create_phase_chart(&split, &title, &chart_path)?;
        info!("Saved {}", chart_path.display());
        Some(chart_path)
    };

    Ok(PhaseOutcome {
        set,
        split,
        csv_path,
        chart_path,
    })
}

/// Aggregates every phase of the plan, in plan order.
///
/// For each phase this reads the `<phase>_<rate>rps.json` files present in the results
/// directory, writes `<phase>_results.csv` and, unless disabled, renders `<phase>_chart.png`
/// from the samples that survive IQR filtering.
///
/// # Arguments
/// * `options` - Results directory, phase plan and chart toggle
///
/// # Returns
/// * `Ok(Vec<PhaseOutcome>)` - One outcome per phase, in plan order
/// * `Err(AggregateError)` - The first read, CSV or chart failure; later phases are not run
pub fn process_results(options: &AggregateOptions) -> Result<Vec<PhaseOutcome>> {
    process_results_with(options, |_| {})
}

/// Same as [`process_results`], calling `on_phase` as soon as each phase completes.
///
/// Phases finished before a failure have already been passed to `on_phase`.
pub fn process_results_with<F>(
    options: &AggregateOptions,
    mut on_phase: F,
) -> Result<Vec<PhaseOutcome>>
where
    F: FnMut(&PhaseOutcome),
{
    let mut outcomes = Vec::with_capacity(options.plan.phases.len());
    for phase in &options.plan.phases {
        let outcome = aggregate_phase(&options.results_dir, phase, options.render_charts)?;
        on_phase(&outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
