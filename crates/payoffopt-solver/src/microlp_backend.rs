use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::time::Instant;

use crate::{MilpModel, MilpSolution, MilpStatus, Sense, SolveStats, SolverBackend};
use payoffopt_types::Result;

/// Branch-and-bound MILP solver backed by microlp through good_lp (pure Rust)
pub struct MicroLpSolver {
    time_limit_secs: Option<f64>,
    integrality_tol: f64,
}

impl MicroLpSolver {
    /// Create a new microlp solver with default settings
    pub fn new() -> Self {
        MicroLpSolver {
            time_limit_secs: None,
            integrality_tol: 1e-6,
        }
    }

    /// Create solver with custom settings
    pub fn with_params(time_limit_secs: Option<f64>, integrality_tol: f64) -> Self {
        MicroLpSolver {
            time_limit_secs,
            integrality_tol,
        }
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &MilpModel) -> Result<MilpSolution> {
        model.validate()?;

        if let Some(limit) = self.time_limit_secs {
            tracing::warn!(
                "microlp does not support a time limit, ignoring {}s",
                limit
            );
        }

        let started = Instant::now();

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables
            .iter()
            .map(|v| {
                let mut def = variable()
                    .min(v.lower_bound)
                    .max(v.upper_bound)
                    .name(v.name.clone());
                if v.integer {
                    def = def.integer();
                }
                vars.add(def)
            })
            .collect();

        let objective = linear_expression(
            handles
                .iter()
                .zip(&model.objective)
                .map(|(&var, &coeff)| (var, coeff)),
        );

        let unsolved = match model.sense {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut problem = unsolved.using(good_lp::microlp);

        for row in &model.constraints {
            let lhs = linear_expression(row.coeffs.iter().map(|(&i, &c)| (handles[i], c)));
            let lower = row.lower;
            let upper = row.upper;

            if row.is_equality() {
                problem = problem.with(constraint!(lhs == lower));
                continue;
            }
            if lower.is_finite() {
                let lhs_lower = lhs.clone();
                problem = problem.with(constraint!(lhs_lower >= lower));
            }
            if upper.is_finite() {
                problem = problem.with(constraint!(lhs <= upper));
            }
        }

        let result = problem.solve();
        let stats = SolveStats {
            wall_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            iterations: None,
            nodes: None,
        };

        let solution = match result {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                return Ok(MilpSolution::without_values(MilpStatus::Infeasible, stats, None));
            }
            Err(ResolutionError::Unbounded) => {
                return Ok(MilpSolution::without_values(MilpStatus::Unbounded, stats, None));
            }
            Err(other) => {
                return Ok(MilpSolution::without_values(
                    MilpStatus::Other,
                    stats,
                    Some(other.to_string()),
                ));
            }
        };

        // Snap integer variables to the lattice to drop LP round-off
        let x: Vec<f64> = model
            .variables
            .iter()
            .zip(&handles)
            .map(|(meta, &var)| {
                let value = solution.value(var);
                if meta.integer && (value - value.round()).abs() <= self.integrality_tol {
                    value.round()
                } else {
                    value
                }
            })
            .collect();

        Ok(MilpSolution {
            objective: model.objective_value(&x),
            x,
            status: MilpStatus::Optimal,
            stats,
            message: None,
        })
    }
}

/// Sum of coeff * var, skipping zero coefficients
fn linear_expression(terms: impl Iterator<Item = (Variable, f64)>) -> Expression {
    terms
        .filter(|(_, coeff)| *coeff != 0.0)
        .fold(Expression::from(0.0), |acc, (var, coeff)| acc + coeff * var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MilpConstraint, MilpVariable, VarMeta};
    use std::collections::BTreeMap;

    fn aux(name: &str) -> VarMeta {
        VarMeta::Auxiliary(name.to_string())
    }

    #[test]
    fn test_integer_knapsack() {
        // Maximize: 5x + 4y
        // Subject to: 6x + 4y <= 24, x + 2y <= 6, 0 <= x, y <= 10 integer
        // Solution: x = 4, y = 0 → 20 (x = 3, y = 1.5 is the LP optimum)
        let mut model = MilpModel::new(Sense::Maximize);
        let x = model.add_variable(MilpVariable::integer("x", aux("x"), 0.0, 10.0));
        let y = model.add_variable(MilpVariable::integer("y", aux("y"), 0.0, 10.0));
        model.set_objective_coefficient(x, 5.0);
        model.set_objective_coefficient(y, 4.0);
        model.add_constraint(MilpConstraint::leq(BTreeMap::from([(x, 6.0), (y, 4.0)]), 24.0));
        model.add_constraint(MilpConstraint::leq(BTreeMap::from([(x, 1.0), (y, 2.0)]), 6.0));

        let solution = MicroLpSolver::new().solve(&model).unwrap();

        assert_eq!(solution.status, MilpStatus::Optimal);
        assert!((solution.objective - 20.0).abs() < 1e-6, "objective = {}", solution.objective);
        assert!(model.is_feasible(&solution.x, 1e-6));
    }

    #[test]
    fn test_equality_and_continuous() {
        // Minimize: t
        // Subject to: t == a + b, a >= 2, b >= 3, a, b integer in [0, 5]
        let mut model = MilpModel::new(Sense::Minimize);
        let a = model.add_variable(MilpVariable::integer("a", aux("a"), 0.0, 5.0));
        let b = model.add_variable(MilpVariable::integer("b", aux("b"), 0.0, 5.0));
        let t = model.add_variable(MilpVariable::continuous("t", aux("t"), 0.0, 100.0));
        model.set_objective_coefficient(t, 1.0);
        model.add_constraint(MilpConstraint::eq(
            BTreeMap::from([(t, 1.0), (a, -1.0), (b, -1.0)]),
            0.0,
        ));
        model.add_constraint(MilpConstraint::geq(BTreeMap::from([(a, 1.0)]), 2.0));
        model.add_constraint(MilpConstraint::geq(BTreeMap::from([(b, 1.0)]), 3.0));

        let solution = MicroLpSolver::new().solve(&model).unwrap();

        assert_eq!(solution.status, MilpStatus::Optimal);
        assert!((solution.x[t] - 5.0).abs() < 1e-6, "t = {}", solution.x[t]);
    }

    #[test]
    fn test_infeasible_milp() {
        // x >= 3 and x <= 2 (infeasible!)
        let mut model = MilpModel::new(Sense::Maximize);
        let x = model.add_variable(MilpVariable::integer("x", aux("x"), 0.0, 10.0));
        model.set_objective_coefficient(x, 1.0);
        model.add_constraint(MilpConstraint::geq(BTreeMap::from([(x, 1.0)]), 3.0));
        model.add_constraint(MilpConstraint::leq(BTreeMap::from([(x, 1.0)]), 2.0));

        let solution = MicroLpSolver::new().solve(&model).unwrap();

        assert_eq!(solution.status, MilpStatus::Infeasible);
        assert!(solution.x.is_empty());
    }
}
