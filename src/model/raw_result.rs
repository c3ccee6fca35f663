use serde::{Deserialize, Serialize};

/// Latency statistics block of a raw benchmark result.
///
/// All values are in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLatencies {
    /// Mean request latency in nanoseconds
    pub mean: f64,
}

/// A single benchmark result as emitted by the load generator for one (phase, rate) run.
///
/// Only the fields needed for aggregation are deserialized; everything else in the
/// file is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Achieved throughput in transactions per second
    pub throughput: f64,
    /// Latency statistics
    pub latencies: RawLatencies,
}
