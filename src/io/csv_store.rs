//! Persistence of phase result sets as CSV.
//!
//! The format is a header row `Rate,Throughput,Mean Latency (ms)` followed by one row
//! per sample.

use crate::model::benchmark_sample::{BenchmarkSample, PhaseResultSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column headers of a persisted phase result set.
pub const CSV_HEADERS: [&str; 3] = ["Rate", "Throughput", "Mean Latency (ms)"];

/// Errors that can occur while reading or writing result CSVs
#[derive(Error, Debug)]
pub enum CsvStoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid CSV data in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

type Result<T> = core::result::Result<T, CsvStoreError>;

fn csv_error(path: &Path, source: csv::Error) -> CsvStoreError {
    if let csv::ErrorKind::Io(io) = source.kind() {
        return CsvStoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }

    CsvStoreError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes all samples of a phase to `path`, including the header row.
///
/// An empty result set produces a header-only file.
pub fn write_phase_csv(set: &PhaseResultSet, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| csv_error(path, e))?;

    for sample in &set.samples {
        writer.serialize(sample).map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(|source| CsvStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Reads at most `limit` leading samples from a result CSV.
///
/// Rows past `limit` are never parsed. A missing file is an error.
pub fn read_phase_csv(path: &Path, limit: usize) -> Result<Vec<BenchmarkSample>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    reader
        .deserialize::<BenchmarkSample>()
        .take(limit)
        .map(|row| row.map_err(|e| csv_error(path, e)))
        .collect()
}
