mod strategy_model;
mod strategy_solution;
mod optimizer;
mod model_builder;

pub use strategy_model::{StrategyModel, KINDS_PER_CELL};
pub use strategy_solution::{CellPosition, OptimizationOutcome, SolutionSummary, StrategySolution};
pub use optimizer::StrategyOptimizer;
pub use model_builder::{objective_coefficients, payoff_matrix, StrategyModelBuilder};
