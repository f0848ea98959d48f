use payoffopt_types::{PayoffOptError, PositionKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variable metadata for tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarMeta {
    /// Contracts of `kind` opened at grid index `purchase`, settled at grid index `expiration`
    Position {
        purchase: usize,
        expiration: usize,
        kind: PositionKind,
    },
    /// Helper variable that carries no position
    Auxiliary(String),
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Variable in the MILP
#[derive(Debug, Clone)]
pub struct MilpVariable {
    pub name: String,
    pub meta: VarMeta,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub integer: bool,
}

impl MilpVariable {
    /// Integer variable with bounds lower <= x <= upper
    pub fn integer(name: impl Into<String>, meta: VarMeta, lower: f64, upper: f64) -> Self {
        MilpVariable {
            name: name.into(),
            meta,
            lower_bound: lower,
            upper_bound: upper,
            integer: true,
        }
    }

    /// Continuous variable with bounds lower <= x <= upper
    pub fn continuous(name: impl Into<String>, meta: VarMeta, lower: f64, upper: f64) -> Self {
        MilpVariable {
            name: name.into(),
            meta,
            lower_bound: lower,
            upper_bound: upper,
            integer: false,
        }
    }
}

/// Linear constraint: lower <= sum(coeffs[i] * x[i]) <= upper
#[derive(Debug, Clone)]
pub struct MilpConstraint {
    pub coeffs: BTreeMap<usize, f64>, // var_index -> coefficient
    pub lower: f64,
    pub upper: f64,
}

impl MilpConstraint {
    /// Create an equality constraint: sum(coeffs[i] * x[i]) = value
    pub fn eq(coeffs: BTreeMap<usize, f64>, value: f64) -> Self {
        MilpConstraint {
            coeffs,
            lower: value,
            upper: value,
        }
    }

    /// Create an upper-bound constraint: sum(coeffs[i] * x[i]) <= upper
    pub fn leq(coeffs: BTreeMap<usize, f64>, upper: f64) -> Self {
        MilpConstraint {
            coeffs,
            lower: f64::NEG_INFINITY,
            upper,
        }
    }

    /// Create a lower-bound constraint: sum(coeffs[i] * x[i]) >= lower
    pub fn geq(coeffs: BTreeMap<usize, f64>, lower: f64) -> Self {
        MilpConstraint {
            coeffs,
            lower,
            upper: f64::INFINITY,
        }
    }

    /// Unit-coefficient sum of the given variables bounded above
    pub fn sum_leq(vars: impl IntoIterator<Item = usize>, upper: f64) -> Self {
        let mut coeffs = BTreeMap::new();
        for idx in vars {
            *coeffs.entry(idx).or_insert(0.0) += 1.0;
        }
        Self::leq(coeffs, upper)
    }

    /// Evaluate the left-hand side at `x`
    pub fn activity(&self, x: &[f64]) -> f64 {
        self.coeffs.iter().map(|(&i, &c)| c * x[i]).sum()
    }

    pub fn is_equality(&self) -> bool {
        self.lower == self.upper
    }
}

/// Mixed-integer linear program:
/// optimize c^T x
/// subject to l <= A x <= u, lb <= x <= ub, x_i integer for flagged i
#[derive(Debug, Clone)]
pub struct MilpModel {
    pub sense: Sense,
    /// Objective coefficients c
    pub objective: Vec<f64>,
    pub variables: Vec<MilpVariable>,
    pub constraints: Vec<MilpConstraint>,
}

impl MilpModel {
    /// Create an empty model
    pub fn new(sense: Sense) -> Self {
        MilpModel {
            sense,
            objective: Vec::new(),
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Add a variable with a zero objective coefficient; returns its index
    pub fn add_variable(&mut self, var: MilpVariable) -> usize {
        self.variables.push(var);
        self.objective.push(0.0);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: MilpConstraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective_coefficient(&mut self, var_index: usize, coeff: f64) {
        self.objective[var_index] = coeff;
    }

    /// Get number of variables
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Get number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of integer variables
    pub fn num_integer_vars(&self) -> usize {
        self.variables.iter().filter(|v| v.integer).count()
    }

    /// Validate model dimensions and bounds
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vars();

        if self.objective.len() != n {
            return Err(PayoffOptError::SolverError(format!(
                "objective length {} != num_vars {}",
                self.objective.len(),
                n
            )));
        }

        if let Some(c) = self.objective.iter().find(|c| !c.is_finite()) {
            return Err(PayoffOptError::SolverError(format!(
                "non-finite objective coefficient {}",
                c
            )));
        }

        for var in &self.variables {
            if var.lower_bound > var.upper_bound {
                return Err(PayoffOptError::SolverError(format!(
                    "variable {} has lower bound {} above upper bound {}",
                    var.name, var.lower_bound, var.upper_bound
                )));
            }
        }

        for (row, constraint) in self.constraints.iter().enumerate() {
            if let Some(&idx) = constraint.coeffs.keys().find(|&&idx| idx >= n) {
                return Err(PayoffOptError::SolverError(format!(
                    "constraint {} references variable {} but model has {}",
                    row, idx, n
                )));
            }
        }

        Ok(())
    }

    /// Objective value c^T x
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, v)| c * v).sum()
    }

    /// Check bounds, integrality and every constraint within `tol`
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() {
            return false;
        }

        let vars_ok = self.variables.iter().zip(x).all(|(var, &v)| {
            v >= var.lower_bound - tol
                && v <= var.upper_bound + tol
                && (!var.integer || (v - v.round()).abs() <= tol)
        });

        vars_ok
            && self.constraints.iter().all(|c| {
                let activity = c.activity(x);
                activity >= c.lower - tol && activity <= c.upper + tol
            })
    }
}
