use nalgebra::DMatrix;
use payoffopt_solver::MilpModel;
use payoffopt_types::{PayoffQuad, PositionKind, PositionLimits, StrikeGrid};

/// Positions per scenario cell
pub const KINDS_PER_CELL: usize = 4;

/// Built optimization model for one strike grid.
///
/// Scenario cells are addressed by `(purchase, expiration)` grid indices; the
/// four position variables of cell `(i, j)` occupy MILP indices
/// `(i * n + j) * 4 .. (i * n + j) * 4 + 4` in `PositionKind` order. The two
/// balance counters follow the position variables.
#[derive(Debug, Clone)]
pub struct StrategyModel {
    pub grid: StrikeGrid,
    pub limits: PositionLimits,
    /// Payoff of each cell, rows = purchase index, columns = expiration index
    pub payoffs: DMatrix<PayoffQuad>,
    pub milp: MilpModel,
    /// Index of the auxiliary long-contract counter
    pub long_counter: usize,
    /// Index of the auxiliary short-contract counter
    pub short_counter: usize,
}

impl StrategyModel {
    /// Number of strikes (N)
    pub fn num_strikes(&self) -> usize {
        self.grid.len()
    }

    /// Number of scenario cells (N²)
    pub fn num_cells(&self) -> usize {
        self.num_strikes() * self.num_strikes()
    }

    /// Number of position variables (4N²), excluding the balance counters
    pub fn num_position_vars(&self) -> usize {
        self.num_cells() * KINDS_PER_CELL
    }

    pub fn var_index(&self, purchase: usize, expiration: usize, kind: PositionKind) -> usize {
        position_var_index(self.num_strikes(), purchase, expiration, kind)
    }

    /// The four variable indices of a cell
    pub fn cell_vars(&self, purchase: usize, expiration: usize) -> [usize; KINDS_PER_CELL] {
        PositionKind::ALL.map(|kind| self.var_index(purchase, expiration, kind))
    }

    pub fn payoff(&self, purchase: usize, expiration: usize) -> &PayoffQuad {
        &self.payoffs[(purchase, expiration)]
    }

    /// Objective coefficient of a position variable
    pub fn coefficient(&self, purchase: usize, expiration: usize, kind: PositionKind) -> f64 {
        self.milp.objective[self.var_index(purchase, expiration, kind)]
    }

    /// Variable indices of all positions of a given kind
    pub fn vars_of_kind(&self, kind: PositionKind) -> impl Iterator<Item = usize> + '_ {
        let n = self.num_strikes();
        (0..n).flat_map(move |i| (0..n).map(move |j| position_var_index(n, i, j, kind)))
    }
}

pub(crate) fn position_var_index(
    n: usize,
    purchase: usize,
    expiration: usize,
    kind: PositionKind,
) -> usize {
    (purchase * n + expiration) * KINDS_PER_CELL + kind.index()
}
