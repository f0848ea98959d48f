use payoffopt_types::{PayoffOptError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::backend::SolverBackend;
use crate::microlp_backend::MicroLpSolver;

/// MILP backends the optimizer knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    MicroLp,
    Highs,
    Cbc,
    Scip,
}

impl SolverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverKind::MicroLp => "microlp",
            SolverKind::Highs => "highs",
            SolverKind::Cbc => "cbc",
            SolverKind::Scip => "scip",
        }
    }
}

impl FromStr for SolverKind {
    type Err = PayoffOptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "microlp" => Ok(SolverKind::MicroLp),
            "highs" => Ok(SolverKind::Highs),
            "cbc" | "coin_cbc" => Ok(SolverKind::Cbc),
            "scip" => Ok(SolverKind::Scip),
            other => Err(PayoffOptError::SolverUnavailable(format!(
                "unknown solver backend '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solver selection and options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub backend: SolverKind,

    /// Wall-clock limit in seconds, forwarded to backends that support one
    pub time_limit_secs: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            backend: SolverKind::MicroLp,
            time_limit_secs: None,
        }
    }
}

/// Instantiate the configured backend.
///
/// Only backends compiled into this build can be created; the rest fail with
/// `SolverUnavailable`.
pub fn create_backend(config: &SolverConfig) -> Result<Box<dyn SolverBackend>> {
    if let Some(limit) = config.time_limit_secs {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(PayoffOptError::Configuration(format!(
                "time limit must be positive, got {}",
                limit
            )));
        }
    }

    match config.backend {
        SolverKind::MicroLp => Ok(Box::new(MicroLpSolver::with_params(
            config.time_limit_secs,
            1e-6,
        ))),
        other => Err(PayoffOptError::SolverUnavailable(format!(
            "backend '{}' is not compiled into this build",
            other
        ))),
    }
}
