use nalgebra::DMatrix;
use payoffopt_solver::{
    create_backend, MicroLpSolver, MilpSolution, MilpStatus, SolverBackend, SolverConfig,
};
use payoffopt_types::{PayoffOptError, PositionKind, PositionLimits, Result, StrikeGrid, StrikeRow};
use std::sync::Arc;

use crate::model_builder::StrategyModelBuilder;
use crate::strategy_model::StrategyModel;
use crate::strategy_solution::{OptimizationOutcome, StrategySolution};

/// Tolerance used to accept a backend assignment
const FEASIBILITY_TOL: f64 = 1e-6;

/// Payoff-maximizing strategy optimizer
pub struct StrategyOptimizer {
    backend: Arc<dyn SolverBackend>,
    builder: StrategyModelBuilder,
}

impl StrategyOptimizer {
    /// Create an optimizer with the microlp backend and default position limits
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MicroLpSolver::new()), PositionLimits::default())
    }

    /// Create with custom backend and limits
    pub fn with_backend(backend: Arc<dyn SolverBackend>, limits: PositionLimits) -> Self {
        StrategyOptimizer {
            backend,
            builder: StrategyModelBuilder::new(limits),
        }
    }

    /// Create from solver configuration; fails if the backend is unavailable
    pub fn from_config(config: &SolverConfig, limits: PositionLimits) -> Result<Self> {
        let backend: Arc<dyn SolverBackend> = Arc::from(create_backend(config)?);
        Ok(Self::with_backend(backend, limits))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn build_model(&self, grid: &StrikeGrid) -> Result<StrategyModel> {
        self.builder.build(grid)
    }

    /// Validate raw rows, build the model and solve it
    pub fn optimize_rows(&self, rows: Vec<StrikeRow>) -> Result<OptimizationOutcome> {
        let grid = StrikeGrid::new(rows)?;
        self.optimize(&grid)
    }

    /// Build the model for `grid` and solve it
    pub fn optimize(&self, grid: &StrikeGrid) -> Result<OptimizationOutcome> {
        let model = self.build_model(grid)?;
        self.solve(&model)
    }

    /// Solve a built model. A non-optimal backend status is reported through
    /// the outcome, not as an error.
    pub fn solve(&self, model: &StrategyModel) -> Result<OptimizationOutcome> {
        let solution = self.backend.solve(&model.milp)?;

        if solution.status != MilpStatus::Optimal {
            tracing::warn!(
                "The problem does not have an optimal solution (status: {}{})",
                solution.status,
                solution
                    .message
                    .as_deref()
                    .map(|m| format!(", {}", m))
                    .unwrap_or_default()
            );
            return Ok(OptimizationOutcome::NoOptimalSolution {
                status: solution.status,
                message: solution.message,
                stats: solution.stats,
            });
        }

        let strategy = self.extract_solution(model, solution)?;
        log_solution(&strategy);
        Ok(OptimizationOutcome::Optimal(strategy))
    }

    /// Map backend values back onto the scenario grid
    fn extract_solution(
        &self,
        model: &StrategyModel,
        solution: MilpSolution,
    ) -> Result<StrategySolution> {
        if !model.milp.is_feasible(&solution.x, FEASIBILITY_TOL) {
            return Err(PayoffOptError::SolverError(format!(
                "{} reported optimal but the assignment violates the model",
                self.backend.name()
            )));
        }

        let n = model.num_strikes();
        let quantities = DMatrix::from_fn(n, n, |i, j| {
            PositionKind::ALL.map(|kind| solution.x[model.var_index(i, j, kind)].round() as u32)
        });

        Ok(StrategySolution {
            strikes: model.grid.strikes().collect(),
            quantities,
            objective: solution.objective,
            stats: solution.stats,
            backend: self.backend.name().to_string(),
        })
    }
}

impl Default for StrategyOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn log_solution(solution: &StrategySolution) {
    tracing::info!("Objective value = {}", solution.objective);
    for position in solution.positions() {
        tracing::debug!(
            "Strike {}: {} long call, {} short call, {} long put, {} short put",
            position.key(),
            position.call_buy,
            position.call_sell,
            position.put_buy,
            position.put_sell
        );
    }

    let stats = &solution.stats;
    tracing::info!("Problem solved in {:.3} milliseconds", stats.wall_time_ms);
    match stats.iterations {
        Some(iterations) => tracing::info!("Problem solved in {} iterations", iterations),
        None => tracing::debug!("Iteration count not reported by {}", solution.backend),
    }
    match stats.nodes {
        Some(nodes) => tracing::info!("Problem solved in {} branch-and-bound nodes", nodes),
        None => tracing::debug!("Node count not reported by {}", solution.backend),
    }
}
