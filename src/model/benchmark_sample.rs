use super::raw_result::RawResult;
use serde::{Deserialize, Serialize};

/// Nanoseconds in a millisecond.
pub const NANOS_PER_MILLI: f64 = 1e6;

/// One data point of a phase: the outcome of benchmarking at a single rate.
///
/// The serde field names double as the CSV column headers of a persisted
/// [`PhaseResultSet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    /// Target transaction arrival rate (TPS)
    #[serde(rename = "Rate")]
    pub rate: u32,

    /// Achieved throughput (TPS)
    #[serde(rename = "Throughput")]
    pub throughput: f64,

    /// Mean latency in milliseconds
    #[serde(rename = "Mean Latency (ms)")]
    pub mean_latency_ms: f64,
}

impl BenchmarkSample {
    /// Creates a sample from a raw result, converting the mean latency from nanoseconds
    /// to milliseconds.
    pub fn from_raw(rate: u32, raw: &RawResult) -> Self {
        Self {
            rate,
            throughput: raw.throughput,
            mean_latency_ms: raw.latencies.mean / NANOS_PER_MILLI,
        }
    }
}

/// Ordered samples of a single named phase, ascending by configured rate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseResultSet {
    /// Phase name (e.g. `bank`)
    pub phase: String,
    /// Samples in configured rate order
    pub samples: Vec<BenchmarkSample>,
}

impl PhaseResultSet {
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Mean latencies of all samples, in sample order.
    pub fn latencies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mean_latency_ms).collect()
    }
}

/// A named run directory holding one complete set of phase CSVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    /// Directory name, used as the legend label when comparing runs
    pub name: String,
}

impl RunDirectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Label shown in chart legends.
    ///
    /// This is the last path component of the name, so `nested/run-a` is shown as `run-a`.
    pub fn label(&self) -> &str {
        self.name
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.name.as_str())
    }
}
