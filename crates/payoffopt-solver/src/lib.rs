mod milp_model;
mod backend;
mod microlp_backend;
mod config;

pub use milp_model::{MilpConstraint, MilpModel, MilpVariable, Sense, VarMeta};
pub use backend::{MilpSolution, MilpStatus, SolveStats, SolverBackend};
pub use microlp_backend::MicroLpSolver;
pub use config::{create_backend, SolverConfig, SolverKind};
