//! Loading of raw per-rate benchmark results.

use crate::model::benchmark_sample::{BenchmarkSample, PhaseResultSet};
use crate::model::phase_plan::PhaseSpec;
use crate::model::raw_result::RawResult;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while reading raw result files
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read input file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

type Result<T> = core::result::Result<T, ReadError>;

/// Parses a single raw result file.
///
/// A file that does not exist yields `Ok(None)`; every other failure is an error.
pub fn read_raw_result(path: &Path) -> Result<Option<RawResult>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ReadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw = serde_json::from_reader(BufReader::new(file)).map_err(|source| ReadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(raw))
}

/// Collects all available samples of a phase from `results_dir`, in configured rate order.
///
/// Rates whose result file is absent are skipped with a warning.
pub fn collect_phase(results_dir: &Path, phase: &PhaseSpec) -> Result<PhaseResultSet> {
    let mut set = PhaseResultSet::new(phase.name.as_str());

    for &rate in &phase.rates {
        let path = results_dir.join(phase.input_file_name(rate));
        match read_raw_result(&path)? {
            Some(raw) => {
                let sample = BenchmarkSample::from_raw(rate, &raw);
                debug!(
                    phase = %phase.name,
                    rate,
                    throughput = sample.throughput,
                    latency_ms = sample.mean_latency_ms,
                    "loaded sample"
                );
                set.samples.push(sample);
            }
            None => warn!("File not found: {}", path.display()),
        }
    }

    Ok(set)
}
