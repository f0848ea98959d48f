use nalgebra::DMatrix;
use payoffopt_solver::{MilpStatus, SolveStats};
use payoffopt_types::{format_level, PositionKind};
use serde::{Deserialize, Serialize};

/// Contracts chosen for one (purchase strike, expiration strike) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellPosition {
    pub purchase_strike: f64,
    pub expiration_strike: f64,
    pub call_buy: u32,
    pub call_sell: u32,
    pub put_buy: u32,
    pub put_sell: u32,
}

impl CellPosition {
    pub fn quantities(&self) -> [u32; 4] {
        [self.call_buy, self.call_sell, self.put_buy, self.put_sell]
    }

    pub fn total(&self) -> u32 {
        self.quantities().iter().sum()
    }

    /// Result key: the (purchase, expiration) tuple rendered as text, e.g. "(2900, 2950)"
    pub fn key(&self) -> String {
        format!(
            "({}, {})",
            format_level(self.purchase_strike),
            format_level(self.expiration_strike)
        )
    }
}

/// Optimal allocation for a strike grid
#[derive(Debug, Clone)]
pub struct StrategySolution {
    pub strikes: Vec<f64>,
    /// Quantities per cell in `PositionKind` order, rows = purchase index
    pub quantities: DMatrix<[u32; 4]>,
    pub objective: f64,
    pub stats: SolveStats,
    pub backend: String,
}

impl StrategySolution {
    pub fn quantity(&self, purchase: usize, expiration: usize, kind: PositionKind) -> u32 {
        self.quantities[(purchase, expiration)][kind.index()]
    }

    /// Cells with at least one contract, purchase-major order
    pub fn positions(&self) -> Vec<CellPosition> {
        let n = self.strikes.len();
        let mut positions = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let [call_buy, call_sell, put_buy, put_sell] = self.quantities[(i, j)];
                if call_buy + call_sell + put_buy + put_sell > 0 {
                    positions.push(CellPosition {
                        purchase_strike: self.strikes[i],
                        expiration_strike: self.strikes[j],
                        call_buy,
                        call_sell,
                        put_buy,
                        put_sell,
                    });
                }
            }
        }
        positions
    }

    fn sum_where(&self, pred: impl Fn(PositionKind) -> bool) -> u32 {
        self.quantities
            .iter()
            .map(|cell| {
                PositionKind::ALL
                    .iter()
                    .filter(|kind| pred(**kind))
                    .map(|kind| cell[kind.index()])
                    .sum::<u32>()
            })
            .sum()
    }

    pub fn total_contracts(&self) -> u32 {
        self.sum_where(|_| true)
    }

    pub fn call_contracts(&self) -> u32 {
        self.sum_where(PositionKind::is_call)
    }

    pub fn put_contracts(&self) -> u32 {
        self.sum_where(|kind| !kind.is_call())
    }

    pub fn long_contracts(&self) -> u32 {
        self.sum_where(PositionKind::is_long)
    }

    pub fn short_contracts(&self) -> u32 {
        self.sum_where(|kind| !kind.is_long())
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            status: MilpStatus::Optimal,
            objective: self.objective,
            backend: self.backend.clone(),
            stats: self.stats.clone(),
            total_contracts: self.total_contracts(),
            long_contracts: self.long_contracts(),
            short_contracts: self.short_contracts(),
            positions: self.positions(),
        }
    }
}

/// Serializable view of a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub status: MilpStatus,
    pub objective: f64,
    pub backend: String,
    pub stats: SolveStats,
    pub total_contracts: u32,
    pub long_contracts: u32,
    pub short_contracts: u32,
    pub positions: Vec<CellPosition>,
}

/// Result of one optimization run
#[derive(Debug, Clone)]
pub enum OptimizationOutcome {
    Optimal(StrategySolution),
    /// The backend did not prove optimality; no allocation is produced
    NoOptimalSolution {
        status: MilpStatus,
        message: Option<String>,
        stats: SolveStats,
    },
}

impl OptimizationOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimal(_))
    }

    pub fn status(&self) -> MilpStatus {
        match self {
            OptimizationOutcome::Optimal(_) => MilpStatus::Optimal,
            OptimizationOutcome::NoOptimalSolution { status, .. } => *status,
        }
    }

    pub fn solution(&self) -> Option<&StrategySolution> {
        match self {
            OptimizationOutcome::Optimal(solution) => Some(solution),
            OptimizationOutcome::NoOptimalSolution { .. } => None,
        }
    }

    pub fn into_solution(self) -> Option<StrategySolution> {
        match self {
            OptimizationOutcome::Optimal(solution) => Some(solution),
            OptimizationOutcome::NoOptimalSolution { .. } => None,
        }
    }
}
