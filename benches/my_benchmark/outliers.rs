use bench_plots::model::benchmark_sample::BenchmarkSample;
use bench_plots::stats::iqr::{IqrBounds, OutlierSplit};
use criterion::{black_box, Criterion};

/// Deterministic latency series with a spike every 97 samples.
fn make_samples(count: usize) -> Vec<BenchmarkSample> {
    (0..count)
        .map(|index| {
            let base = 10.0 + (index % 13) as f64 * 0.25;
            let mean_latency_ms = if index % 97 == 0 { base * 40.0 } else { base };
            BenchmarkSample {
                rate: 40 + index as u32 * 20,
                throughput: 40.0 + index as f64 * 19.5,
                mean_latency_ms,
            }
        })
        .collect()
}

pub fn bench_outlier_split(c: &mut Criterion) {
    let sample_counts = [10, 1000, 100_000];

    for &count in &sample_counts {
        let samples = make_samples(count);
        let latencies: Vec<f64> = samples.iter().map(|s| s.mean_latency_ms).collect();

        c.bench_function(&format!("iqr_bounds_{}", count), |b| {
            b.iter(|| IqrBounds::from_values(black_box(&latencies)))
        });

        c.bench_function(&format!("outlier_split_{}", count), |b| {
            b.iter(|| OutlierSplit::from_samples(black_box(&samples)))
        });

        let split = OutlierSplit::from_samples(&samples);
        println!(
            "[outlier_split_{}] Outliers: {} of {}",
            count,
            split.outliers.len(),
            count
        );
    }
}
