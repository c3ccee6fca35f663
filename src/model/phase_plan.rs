//! The set of phases and rates a benchmark campaign covers.
//!
//! The default plan matches the campaign the aggregator was written for; a different
//! campaign can be described in a JSON file:
//!
//! ```json
//! { "phases": [ { "name": "bank", "rates": [40, 80, 120] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a phase plan
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse plan file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid plan: {0}")]
    Invalid(String),
}

type Result<T> = core::result::Result<T, PlanError>;

/// A named phase and the rates (TPS) it was benchmarked at, in the order they should appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    pub rates: Vec<u32>,
}

impl PhaseSpec {
    pub fn new(name: impl Into<String>, rates: &[u32]) -> Self {
        Self {
            name: name.into(),
            rates: rates.to_vec(),
        }
    }

    /// File name of the raw JSON result for the given rate, e.g. `bank_40rps.json`.
    pub fn input_file_name(&self, rate: u32) -> String {
        format!("{}_{}rps.json", self.name, rate)
    }

    /// File name of the aggregated CSV, e.g. `bank_results.csv`.
    pub fn csv_file_name(&self) -> String {
        results_csv_name(&self.name)
    }

    /// File name of the per-phase chart, e.g. `bank_chart.png`.
    pub fn chart_file_name(&self) -> String {
        format!("{}_chart.png", self.name)
    }
}

/// File name of the aggregated CSV for a phase or base name.
pub fn results_csv_name(base_name: &str) -> String {
    format!("{base_name}_results.csv")
}

/// Ordered list of phases to aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePlan {
    pub phases: Vec<PhaseSpec>,
}

impl Default for PhasePlan {
    fn default() -> Self {
        Self {
            phases: vec![
                PhaseSpec::new(
                    "bexchange",
                    &[40, 60, 80, 100, 120, 140, 160, 180, 200, 220, 240],
                ),
                PhaseSpec::new(
                    "exchange",
                    &[40, 80, 120, 160, 240, 320, 360, 400, 440, 480],
                ),
                PhaseSpec::new("bank", &[40, 80, 120, 160, 240, 320, 360, 400, 440, 480]),
            ],
        }
    }
}

impl PhasePlan {
    /// Loads and validates a plan from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let plan: PhasePlan =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| PlanError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        plan.validate()?;
        Ok(plan)
    }

    /// Checks that the plan has at least one phase, that phase names are non-empty and
    /// unique, and that no phase has an empty rate list.
    pub fn validate(&self) -> Result<()> {
        if self.phases.is_empty() {
            return Err(PlanError::Invalid("plan contains no phases".to_string()));
        }

        for (index, phase) in self.phases.iter().enumerate() {
            if phase.name.trim().is_empty() {
                return Err(PlanError::Invalid(format!(
                    "phase #{index} has an empty name"
                )));
            }

            if phase.rates.is_empty() {
                return Err(PlanError::Invalid(format!(
                    "phase '{}' has no rates",
                    phase.name
                )));
            }

            if self.phases[..index].iter().any(|p| p.name == phase.name) {
                return Err(PlanError::Invalid(format!(
                    "phase '{}' is listed more than once",
                    phase.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_plan_matches_campaign() {
        let plan = PhasePlan::default();
        let names: Vec<&str> = plan.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["bexchange", "exchange", "bank"]);
        assert_eq!(plan.phases[0].rates.len(), 11);
        assert_eq!(plan.phases[2].rates.last(), Some(&480));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn file_names() {
        let phase = PhaseSpec::new("bank", &[40]);
        assert_eq!(phase.input_file_name(440), "bank_440rps.json");
        assert_eq!(phase.csv_file_name(), "bank_results.csv");
        assert_eq!(phase.chart_file_name(), "bank_chart.png");
    }

    #[test]
    fn loads_plan_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(
            &path,
            r#"{ "phases": [ { "name": "query", "rates": [10, 20] } ] }"#,
        )
        .unwrap();

        let plan = PhasePlan::from_json_file(&path).unwrap();
        assert_eq!(plan.phases, vec![PhaseSpec::new("query", &[10, 20])]);
    }

    #[test]
    fn rejects_invalid_plans() {
        let empty = PhasePlan { phases: vec![] };
        assert!(matches!(empty.validate(), Err(PlanError::Invalid(_))));

        let no_rates = PhasePlan {
            phases: vec![PhaseSpec::new("bank", &[])],
        };
        assert!(matches!(no_rates.validate(), Err(PlanError::Invalid(_))));

        let duplicate = PhasePlan {
            phases: vec![PhaseSpec::new("bank", &[40]), PhaseSpec::new("bank", &[80])],
        };
        assert!(matches!(duplicate.validate(), Err(PlanError::Invalid(_))));

        let unnamed = PhasePlan {
            phases: vec![PhaseSpec::new(" ", &[40])],
        };
        assert!(matches!(unnamed.validate(), Err(PlanError::Invalid(_))));
    }

    #[test]
    fn missing_plan_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = PhasePlan::from_json_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PlanError::Io { .. })));
    }
}
