//! Interquartile-range based outlier detection.
//!
//! Quartiles use linear interpolation between closest ranks (position `(n - 1) * q` in the
//! sorted data), the same definition most dataframe libraries default to. A value is an
//! outlier iff it lies strictly outside `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]`.

use crate::model::benchmark_sample::{BenchmarkSample, PhaseResultSet};

/// Multiplier applied to the IQR to obtain the fences.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Computes the `q`-th quantile (`0.0..=1.0`) of already sorted data.
///
/// Returns [`None`] for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Quartiles and fences of a data set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Computes the bounds of the given (unsorted) values.
    ///
    /// Quartiles are linearly interpolated at position `(n - 1) * q` of the sorted values,
    /// and the fences lie [`IQR_FENCE_FACTOR`] interquartile ranges outside them.
    ///
    /// # Arguments
    /// * `values` - Sample values in any order; NaN values are ignored
    ///
    /// # Returns
    /// * `Some(IqrBounds)` - The quartiles and fences of the remaining values
    /// * `None` - If no non-NaN values remain
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_unstable_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            lower: q1 - IQR_FENCE_FACTOR * iqr,
            upper: q3 + IQR_FENCE_FACTOR * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whether the value falls within the (inclusive) fences.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        !self.contains(value)
    }
}

/// A result set split by latency into inliers and outliers, both keeping their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlierSplit {
    pub kept: Vec<BenchmarkSample>,
    pub outliers: Vec<BenchmarkSample>,
    pub bounds: Option<IqrBounds>,
}

impl OutlierSplit {
    /// Splits the samples of a phase on their mean latency.
    pub fn from_result_set(set: &PhaseResultSet) -> Self {
        Self::from_samples(&set.samples)
    }

    pub fn from_samples(samples: &[BenchmarkSample]) -> Self {
        let latencies: Vec<f64> = samples.iter().map(|s| s.mean_latency_ms).collect();
        let Some(bounds) = IqrBounds::from_values(&latencies) else {
            return Self::default();
        };

        let (kept, outliers) = samples
            .iter()
            .copied()
            .partition(|sample| bounds.contains(sample.mean_latency_ms));

        Self {
            kept,
            outliers,
            bounds: Some(bounds),
        }
    }

    pub fn is_outlier(&self, sample: &BenchmarkSample) -> bool {
        self.outliers.iter().any(|o| o == sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn samples(latencies: &[f64]) -> Vec<BenchmarkSample> {
        latencies
            .iter()
            .enumerate()
            .map(|(index, &latency)| BenchmarkSample {
                rate: (index as u32 + 1) * 40,
                throughput: (index as f64 + 1.0) * 40.0,
                mean_latency_ms: latency,
            })
            .collect()
    }

    #[rstest]
    #[case(&[1.0, 2.0, 3.0, 4.0], 0.25, 1.75)]
    #[case(&[1.0, 2.0, 3.0, 4.0], 0.75, 3.25)]
    #[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5, 3.0)]
    #[case(&[7.0], 0.25, 7.0)]
    #[case(&[10.0, 20.0], 0.0, 10.0)]
    #[case(&[10.0, 20.0], 1.0, 20.0)]
    fn linear_quantiles(#[case] sorted: &[f64], #[case] q: f64, #[case] expected: f64) {
        let value = quantile_sorted(sorted, q).unwrap();
        assert!((value - expected).abs() < 1e-12, "{value} != {expected}");
    }

    #[test]
    fn quantile_of_empty_is_none() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(IqrBounds::from_values(&[]), None);
    }

    #[test]
    fn zero_iqr_marks_spike_as_outlier() {
        let bounds = IqrBounds::from_values(&[10.0, 10.0, 10.0, 10.0, 100.0]).unwrap();
        assert_eq!(bounds.q1, 10.0);
        assert_eq!(bounds.q3, 10.0);
        assert_eq!(bounds.iqr(), 0.0);
        assert!(bounds.is_outlier(100.0));
        assert!(!bounds.is_outlier(10.0));
    }

    #[test]
    fn hand_computed_fences() {
        // sorted: 1 2 3 4 5 6 7 8 -> Q1 = 2.75, Q3 = 6.25, IQR = 3.5
        let bounds = IqrBounds::from_values(&[8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0]).unwrap();
        assert!((bounds.q1 - 2.75).abs() < 1e-12);
        assert!((bounds.q3 - 6.25).abs() < 1e-12);
        assert!((bounds.lower - (2.75 - 5.25)).abs() < 1e-12);
        assert!((bounds.upper - (6.25 + 5.25)).abs() < 1e-12);
    }

    #[test]
    fn fences_are_inclusive() {
        // Q1 = 2, Q3 = 4, IQR = 2 -> fences [-1, 7]
        let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);
        assert!(bounds.contains(7.0));
        assert!(bounds.contains(-1.0));
        assert!(bounds.is_outlier(7.000001));
        assert!(bounds.is_outlier(-1.000001));
    }

    #[test]
    fn split_preserves_order_and_separates_outliers() {
        let input = samples(&[12.0, 11.0, 250.0, 13.0, 12.5]);
        let split = OutlierSplit::from_samples(&input);

        let kept_rates: Vec<u32> = split.kept.iter().map(|s| s.rate).collect();
        assert_eq!(kept_rates, vec![40, 80, 160, 200]);
        assert_eq!(split.outliers.len(), 1);
        assert_eq!(split.outliers[0].rate, 120);
        assert!(split.is_outlier(&input[2]));
        assert!(!split.is_outlier(&input[0]));
    }

    #[test]
    fn split_of_empty_set_is_empty() {
        let split = OutlierSplit::from_samples(&[]);
        assert!(split.kept.is_empty());
        assert!(split.outliers.is_empty());
        assert!(split.bounds.is_none());
    }

    #[test]
    fn uniform_latencies_have_no_outliers() {
        let split = OutlierSplit::from_samples(&samples(&[5.0, 5.0, 5.0]));
        assert_eq!(split.kept.len(), 3);
        assert!(split.outliers.is_empty());
    }
}
