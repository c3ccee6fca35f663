//! Overlaying the aggregated CSVs of several runs on one chart.

use crate::io::csv_store::{read_phase_csv, CsvStoreError};
use crate::model::benchmark_sample::RunDirectory;
use crate::model::phase_plan::results_csv_name;
use crate::plots::combined_chart::{create_combined_chart, RunSeries};
use crate::plots::plot_error::PlotError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Default directory holding one sub-directory per run.
pub const DEFAULT_RESULTS_ROOT: &str = "results";

/// Errors that can occur while combining runs
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvStoreError),

    #[error("Chart generation error: {0}")]
    Plot(#[from] PlotError),
}

type Result<T> = core::result::Result<T, CombineError>;

/// Settings of a combine run.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineOptions {
    /// Phase (or other base) name; selects `<base_name>_results.csv` in every run
    pub base_name: String,
    /// Number of leading rows taken from each CSV
    pub num_rates: usize,
    /// Runs to compare, in legend order
    pub runs: Vec<RunDirectory>,
    /// Directory containing the run directories; the combined chart is written here
    pub results_root: PathBuf,
}

impl CombineOptions {
    /// Builds options from `<base_name> <num_rates> <dir_1> ... <dir_n>`.
    ///
    /// Returns `Ok(None)` when fewer than three positionals were given, which callers treat
    /// as a request for the usage message.
    pub fn from_positionals(
        args: &[String],
        results_root: impl Into<PathBuf>,
    ) -> Result<Option<Self>> {
        let [base_name, num_rates, dirs @ ..] = args else {
            return Ok(None);
        };
        if dirs.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            base_name: base_name.clone(),
            num_rates: parse_num_rates(num_rates)?,
            runs: dirs.iter().map(RunDirectory::new).collect(),
            results_root: results_root.into(),
        }))
    }

    /// Location of a run's CSV: `<results_root>/<run>/<base_name>_results.csv`.
    pub fn run_csv_path(&self, run: &RunDirectory) -> PathBuf {
        self.results_root
            .join(&run.name)
            .join(results_csv_name(&self.base_name))
    }

    /// Location of the output chart: `<results_root>/<base_name>_combined_chart.png`.
    pub fn chart_path(&self) -> PathBuf {
        self.results_root
            .join(format!("{}_combined_chart.png", self.base_name))
    }
}

/// Parses the `num_rates` argument.
pub fn parse_num_rates(value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        CombineError::InvalidArgument(format!(
            "num_rates must be a non-negative integer, got '{value}'"
        ))
    })
}

/// Reads the leading `num_rates` rows of every run's CSV, in run order.
///
/// The first missing or malformed CSV aborts the whole operation.
pub fn load_runs(options: &CombineOptions) -> Result<Vec<RunSeries>> {
    options
        .runs
        .iter()
        .map(|run| {
            let path = options.run_csv_path(run);
            let samples = read_phase_csv(&path, options.num_rates)?;
            debug!(run = %run.name, rows = samples.len(), path = %path.display(), "loaded run");
            Ok(RunSeries::new(run.label(), samples))
        })
        .collect()
}

/// Loads all runs and writes the combined chart.
///
/// Runs whose CSV has no rows (or a `num_rates` of 0) are still drawn: they keep their
/// legend entries and contribute no bars or points.
///
/// # Arguments
/// * `options` - Base name, row count, runs and results root of the comparison
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the saved chart, `<results_root>/<base_name>_combined_chart.png`
/// * `Err(CombineError)` - If a run's CSV is missing or malformed, or rendering failed
pub fn combine_results(options: &CombineOptions) -> Result<PathBuf> {
    let runs = load_runs(options)?;
    let chart_path = options.chart_path();
    create_combined_chart(&runs, &chart_path)?;
    info!("Saved {}", chart_path.display());
    Ok(chart_path)
}
