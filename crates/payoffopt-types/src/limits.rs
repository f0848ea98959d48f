use serde::{Deserialize, Serialize};

use crate::error::{PayoffOptError, Result};

/// Position caps applied by the constraint builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionLimits {
    /// Upper bound of every position variable
    pub per_variable_max: u32,

    /// Contracts per (purchase, expiration) cell, all four kinds combined
    pub per_cell_max: u32,

    /// Per-kind cap when grouping by purchase strike or by expiration strike,
    /// and the combined call (put) cap per purchase strike
    pub per_strike_max: u32,

    /// Total contracts across the whole strategy
    pub total_max: u32,

    /// Call contracts (buy + sell) across the strategy
    pub call_side_max: u32,

    /// Put contracts (buy + sell) across the strategy
    pub put_side_max: u32,

    /// Upper bound of the auxiliary long/short counters
    pub balance_counter_max: f64,

    /// Short contracts allowed per long contract
    pub shorts_per_long: f64,
}

impl PositionLimits {
    /// Reject caps that would make the model meaningless
    pub fn validate(&self) -> Result<()> {
        let caps = [
            ("per_variable_max", self.per_variable_max),
            ("per_cell_max", self.per_cell_max),
            ("per_strike_max", self.per_strike_max),
            ("total_max", self.total_max),
            ("call_side_max", self.call_side_max),
            ("put_side_max", self.put_side_max),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, v)| *v == 0) {
            return Err(PayoffOptError::Configuration(format!(
                "{} must be positive",
                name
            )));
        }

        if !self.balance_counter_max.is_finite() || self.balance_counter_max <= 0.0 {
            return Err(PayoffOptError::Configuration(format!(
                "balance_counter_max must be positive, got {}",
                self.balance_counter_max
            )));
        }

        if !self.shorts_per_long.is_finite() || self.shorts_per_long < 0.0 {
            return Err(PayoffOptError::Configuration(format!(
                "shorts_per_long must be non-negative, got {}",
                self.shorts_per_long
            )));
        }

        Ok(())
    }
}

impl Default for PositionLimits {
    fn default() -> Self {
        PositionLimits {
            per_variable_max: 4,
            per_cell_max: 4,
            per_strike_max: 4,
            total_max: 16,
            call_side_max: 8,
            put_side_max: 8,
            balance_counter_max: 100.0,
            shorts_per_long: 2.0,
        }
    }
}
