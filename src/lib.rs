//! # bench-plots
//! Aggregation and charting of load benchmark results.
//!
//! Raw per-rate JSON results are aggregated into one CSV and one chart per phase
//! ([`pipeline::aggregate`]); the CSVs of several runs can then be overlaid on a single
//! chart for comparison ([`pipeline::combine`]).

/// Data structures shared by all stages.
pub mod model {
    /// One benchmark data point, the ordered samples of a phase, and named run directories.
    pub mod benchmark_sample;

    /// Phases and rates covered by a benchmark campaign.
    pub mod phase_plan;

    /// Shape of the raw JSON result emitted by the load generator.
    pub mod raw_result;
}

/// Reading and writing of result files.
pub mod io {
    pub mod csv_store;
    pub mod json_reader;
}

/// Descriptive statistics.
pub mod stats {
    /// Interquartile-range outlier detection.
    pub mod iqr;
}

/// Chart rendering via [`plotters`].
pub mod plots {
    pub mod combined_chart;
    pub mod markers;
    pub mod phase_chart;
    pub mod plot_error;
    pub mod style;
}

/// Console reports.
pub mod report {
    pub mod summary_table;
}

/// End-to-end operations invoked by the command-line tools.
pub mod pipeline {
    pub mod aggregate;
    pub mod combine;
}

/// Commonly used items.
pub mod prelude {
    pub use crate::model::benchmark_sample::{BenchmarkSample, PhaseResultSet, RunDirectory};
    pub use crate::model::phase_plan::{PhasePlan, PhaseSpec, PlanError};
    pub use crate::pipeline::aggregate::{
        process_results, process_results_with, AggregateError, AggregateOptions, PhaseOutcome,
    };
    pub use crate::pipeline::combine::{
        combine_results, CombineError, CombineOptions, DEFAULT_RESULTS_ROOT,
    };
    pub use crate::report::summary_table::format_phase_table;
    pub use crate::stats::iqr::{IqrBounds, OutlierSplit};
}
