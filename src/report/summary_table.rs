//! ASCII summary tables of aggregated phases, formatted with the [`tabled`] crate.

use crate::model::benchmark_sample::PhaseResultSet;
use crate::stats::iqr::OutlierSplit;
use tabled::{Table, Tabled};

/// A single row of a phase summary table
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Rate")]
    pub rate: u32,
    #[tabled(rename = "Throughput")]
    pub throughput: String,
    #[tabled(rename = "Mean Latency (ms)")]
    pub mean_latency_ms: String,
    #[tabled(rename = "Outlier")]
    pub outlier: String,
}

/// Builds one row per sample, flagging latency outliers.
pub fn summary_rows(set: &PhaseResultSet, split: &OutlierSplit) -> Vec<SummaryRow> {
    set.samples
        .iter()
        .map(|sample| {
            let outlier = if split.is_outlier(sample) { "yes" } else { "" };
            SummaryRow {
                rate: sample.rate,
                throughput: format!("{:.2}", sample.throughput),
                mean_latency_ms: format!("{:.3}", sample.mean_latency_ms),
                outlier: outlier.to_string(),
            }
        })
        .collect()
}

/// Formats the samples of a phase as an ASCII table with a title.
pub fn format_phase_table(set: &PhaseResultSet, split: &OutlierSplit) -> String {
    let title = format!("{} ({} samples)", set.phase, set.len());
    if set.is_empty() {
        return format!("{}\n{}\nNo samples found", title, "=".repeat(title.len()));
    }

    let table = Table::new(summary_rows(set, split)).to_string();
    format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::benchmark_sample::BenchmarkSample;

    fn phase(latencies: &[f64]) -> PhaseResultSet {
        let mut set = PhaseResultSet::new("exchange");
        for (index, &latency) in latencies.iter().enumerate() {
            set.samples.push(BenchmarkSample {
                rate: (index as u32 + 1) * 40,
                throughput: 39.5,
                mean_latency_ms: latency,
            });
        }
        set
    }

    #[test]
    fn rows_flag_outliers() {
        let set = phase(&[10.0, 10.0, 10.0, 10.0, 100.0]);
        let split = OutlierSplit::from_result_set(&set);
        let rows = summary_rows(&set, &split);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].outlier, "");
        assert_eq!(rows[4].outlier, "yes");
        assert_eq!(rows[4].rate, 200);
        assert_eq!(rows[0].throughput, "39.50");
        assert_eq!(rows[0].mean_latency_ms, "10.000");
    }

    #[test]
    fn table_contains_headers_and_title() {
        let set = phase(&[2.5, 3.0]);
        let split = OutlierSplit::from_result_set(&set);
        let table = format_phase_table(&set, &split);

        assert!(table.starts_with("exchange (2 samples)"));
        assert!(table.contains("Rate"));
        assert!(table.contains("Mean Latency (ms)"));
        assert!(table.contains("2.500"));
    }

    #[test]
    fn empty_phase_table() {
        let set = PhaseResultSet::new("bank");
        let table = format_phase_table(&set, &OutlierSplit::default());
        assert!(table.contains("No samples found"));
    }
}
