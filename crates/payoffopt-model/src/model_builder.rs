use nalgebra::DMatrix;
use payoffopt_solver::{MilpConstraint, MilpModel, MilpVariable, Sense, VarMeta};
use payoffopt_types::{
    format_level, PayoffQuad, PositionKind, PositionLimits, Result, StrikeGrid, StrikeRow,
};
use std::collections::BTreeMap;

use crate::strategy_model::{position_var_index, StrategyModel};

/// Builder for the strategy MILP
#[derive(Debug, Clone, Default)]
pub struct StrategyModelBuilder {
    limits: PositionLimits,
}

impl StrategyModelBuilder {
    pub fn new(limits: PositionLimits) -> Self {
        StrategyModelBuilder { limits }
    }

    pub fn limits(&self) -> &PositionLimits {
        &self.limits
    }

    /// Build variables, constraints and objective for every
    /// (purchase strike, expiration strike) pair of the grid
    pub fn build(&self, grid: &StrikeGrid) -> Result<StrategyModel> {
        self.limits.validate()?;

        let payoffs = payoff_matrix(grid);
        let mut milp = MilpModel::new(Sense::Maximize);

        self.add_position_variables(&mut milp, grid);
        let long_counter = milp.add_variable(MilpVariable::continuous(
            "n_long_options",
            VarMeta::Auxiliary("n_long_options".to_string()),
            0.0,
            self.limits.balance_counter_max,
        ));
        let short_counter = milp.add_variable(MilpVariable::continuous(
            "n_short_options",
            VarMeta::Auxiliary("n_short_options".to_string()),
            0.0,
            self.limits.balance_counter_max,
        ));

        let n = grid.len();
        self.add_cell_constraints(&mut milp, n);
        self.add_purchase_strike_constraints(&mut milp, n);
        self.add_expiration_strike_constraints(&mut milp, n);
        self.add_global_constraints(&mut milp, n);
        self.add_balance_constraints(&mut milp, n, long_counter, short_counter);
        set_objective(&mut milp, grid, &payoffs);

        tracing::info!(
            "Built strategy model: {} strikes, {} variables, {} constraints",
            n,
            milp.num_vars(),
            milp.num_constraints()
        );

        Ok(StrategyModel {
            grid: grid.clone(),
            limits: self.limits.clone(),
            payoffs,
            milp,
            long_counter,
            short_counter,
        })
    }

    fn add_position_variables(&self, milp: &mut MilpModel, grid: &StrikeGrid) {
        let upper = f64::from(self.limits.per_variable_max);
        for (i, row) in grid.rows().iter().enumerate() {
            for (j, exp_row) in grid.rows().iter().enumerate() {
                for kind in PositionKind::ALL {
                    let idx = milp.add_variable(MilpVariable::integer(
                        variable_name(kind, row, exp_row.strike),
                        VarMeta::Position {
                            purchase: i,
                            expiration: j,
                            kind,
                        },
                        0.0,
                        upper,
                    ));
                    debug_assert_eq!(idx, position_var_index(grid.len(), i, j, kind));
                }
            }
        }
    }

    /// Each scenario cell holds at most `per_cell_max` contracts
    fn add_cell_constraints(&self, milp: &mut MilpModel, n: usize) {
        let cap = f64::from(self.limits.per_cell_max);
        for i in 0..n {
            for j in 0..n {
                let vars = PositionKind::ALL.map(|kind| position_var_index(n, i, j, kind));
                milp.add_constraint(MilpConstraint::sum_leq(vars, cap));
            }
        }
    }

    /// Per purchase strike: each kind capped, plus combined call and combined put caps
    fn add_purchase_strike_constraints(&self, milp: &mut MilpModel, n: usize) {
        let cap = f64::from(self.limits.per_strike_max);
        for i in 0..n {
            let column = move |kind: PositionKind| {
                (0..n).map(move |j| position_var_index(n, i, j, kind))
            };

            for kind in PositionKind::ALL {
                milp.add_constraint(MilpConstraint::sum_leq(column(kind), cap));
            }
            milp.add_constraint(MilpConstraint::sum_leq(
                column(PositionKind::CallBuy).chain(column(PositionKind::CallSell)),
                cap,
            ));
            milp.add_constraint(MilpConstraint::sum_leq(
                column(PositionKind::PutBuy).chain(column(PositionKind::PutSell)),
                cap,
            ));
        }
    }

    /// Per expiration strike: each kind capped, no combined caps
    fn add_expiration_strike_constraints(&self, milp: &mut MilpModel, n: usize) {
        let cap = f64::from(self.limits.per_strike_max);
        for j in 0..n {
            for kind in PositionKind::ALL {
                milp.add_constraint(MilpConstraint::sum_leq(
                    (0..n).map(|i| position_var_index(n, i, j, kind)),
                    cap,
                ));
            }
        }
    }

    /// Strategy-wide caps: all contracts, call side, put side
    fn add_global_constraints(&self, milp: &mut MilpModel, n: usize) {
        let all = move |pred: fn(PositionKind) -> bool| {
            (0..n * n).flat_map(move |cell| {
                PositionKind::ALL
                    .into_iter()
                    .filter(move |kind| pred(*kind))
                    .map(move |kind| position_var_index(n, cell / n, cell % n, kind))
            })
        };

        milp.add_constraint(MilpConstraint::sum_leq(
            all(|_| true),
            f64::from(self.limits.total_max),
        ));
        milp.add_constraint(MilpConstraint::sum_leq(
            all(PositionKind::is_call),
            f64::from(self.limits.call_side_max),
        ));
        milp.add_constraint(MilpConstraint::sum_leq(
            all(|kind| !kind.is_call()),
            f64::from(self.limits.put_side_max),
        ));
    }

    /// Counters pinned to the long and short totals, then
    /// shorts_per_long * n_long - n_short >= 0
    fn add_balance_constraints(
        &self,
        milp: &mut MilpModel,
        n: usize,
        long_counter: usize,
        short_counter: usize,
    ) {
        for (counter, is_long) in [(long_counter, true), (short_counter, false)] {
            let mut coeffs = BTreeMap::new();
            for cell in 0..n * n {
                for kind in PositionKind::ALL.into_iter().filter(|k| k.is_long() == is_long) {
                    coeffs.insert(position_var_index(n, cell / n, cell % n, kind), 1.0);
                }
            }
            coeffs.insert(counter, -1.0);
            milp.add_constraint(MilpConstraint::eq(coeffs, 0.0));
        }

        milp.add_constraint(MilpConstraint::geq(
            BTreeMap::from([
                (long_counter, self.limits.shorts_per_long),
                (short_counter, -1.0),
            ]),
            0.0,
        ));
    }
}

/// Payoff of every (purchase, expiration) pair of the grid
pub fn payoff_matrix(grid: &StrikeGrid) -> DMatrix<PayoffQuad> {
    let rows = grid.rows();
    DMatrix::from_fn(rows.len(), rows.len(), |i, j| {
        PayoffQuad::at_expiration(rows[i].strike, rows[j].strike)
    })
}

/// Objective coefficients of a cell in `PositionKind` order.
///
/// Every coefficient nets the put premium quoted at the purchase strike,
/// including the two call positions.
pub fn objective_coefficients(quad: &PayoffQuad, purchase_row: &StrikeRow) -> [f64; 4] {
    let premium = purchase_row.put_price;
    [
        quad.long_call - premium,
        quad.short_call + premium,
        quad.long_put - premium,
        quad.short_put + premium,
    ]
}

fn set_objective(milp: &mut MilpModel, grid: &StrikeGrid, payoffs: &DMatrix<PayoffQuad>) {
    let n = grid.len();
    for (i, row) in grid.rows().iter().enumerate() {
        for j in 0..n {
            let coeffs = objective_coefficients(&payoffs[(i, j)], row);
            for kind in PositionKind::ALL {
                milp.set_objective_coefficient(
                    position_var_index(n, i, j, kind),
                    coeffs[kind.index()],
                );
            }
        }
    }
}

fn variable_name(kind: PositionKind, row: &StrikeRow, expiration_strike: f64) -> String {
    format!(
        "{}_s{}_exp{}_c{}_p{}",
        kind,
        format_level(row.strike),
        format_level(expiration_strike),
        format_level(row.call_price),
        format_level(row.put_price)
    )
}
