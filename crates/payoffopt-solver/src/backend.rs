use payoffopt_types::Result;
use serde::{Deserialize, Serialize};

use crate::milp_model::MilpModel;

/// MILP solver status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilpStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Other,
}

impl std::fmt::Display for MilpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MilpStatus::Optimal => "optimal",
            MilpStatus::Infeasible => "infeasible",
            MilpStatus::Unbounded => "unbounded",
            MilpStatus::Other => "other",
        };
        f.write_str(s)
    }
}

/// Run statistics reported by a backend.
///
/// Iteration and node counts are `None` when the backend does not expose them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    pub wall_time_ms: f64,
    pub iterations: Option<u64>,
    pub nodes: Option<u64>,
}

/// Solution from MILP solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilpSolution {
    /// Variable values, empty unless status is `Optimal`
    pub x: Vec<f64>,
    pub status: MilpStatus,
    pub objective: f64,
    pub stats: SolveStats,
    /// Backend message for non-optimal outcomes
    pub message: Option<String>,
}

impl MilpSolution {
    /// Non-optimal outcome without variable values
    pub fn without_values(status: MilpStatus, stats: SolveStats, message: Option<String>) -> Self {
        MilpSolution {
            x: Vec::new(),
            status,
            objective: f64::NAN,
            stats,
            message,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == MilpStatus::Optimal
    }
}

/// Trait for MILP solver backends
pub trait SolverBackend: Send + Sync {
    /// Short backend name used in logs and reports
    fn name(&self) -> &'static str;

    /// Solve a MILP: optimize c^T x subject to l <= A x <= u and variable bounds.
    ///
    /// Infeasible and unbounded problems are reported through `MilpSolution::status`;
    /// `Err` is reserved for models the backend cannot accept.
    fn solve(&self, model: &MilpModel) -> Result<MilpSolution>;
}
