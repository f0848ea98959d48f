use payoffopt_solver::SolverConfig;
use payoffopt_types::{PayoffOptError, PositionLimits, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for an optimizer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Option chain export with `Strike`, `Price_CALL` and `Price_PUT` columns
    pub input_path: PathBuf,

    /// Where the non-zero allocation is written as JSON
    pub output_path: PathBuf,

    /// Optional run report with input/output hashes
    pub report_path: Option<PathBuf>,

    /// Column separator of the input file
    pub delimiter: char,

    pub solver: SolverConfig,

    pub limits: PositionLimits,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/maximize_payoff_input.csv"),
            output_path: PathBuf::from("data/results_maximize_payoff.json"),
            report_path: None,
            delimiter: ';',
            solver: SolverConfig::default(),
            limits: PositionLimits::default(),
        }
    }
}

impl OptimizerConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PayoffOptError::IoError(format!("{}: {}", path.display(), e)))?;
        let config: OptimizerConfig = serde_json::from_str(&text).map_err(|e| {
            PayoffOptError::Configuration(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        self.limits.validate()
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && !b.is_ascii_alphanumeric())
            .ok_or_else(|| {
                PayoffOptError::Configuration(format!(
                    "delimiter {:?} must be a single ASCII punctuation or whitespace character",
                    self.delimiter
                ))
            })
    }
}
