use serde::{Deserialize, Serialize};

use crate::error::{PayoffOptError, Result};

/// One strike level of an option chain with the current call and put prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeRow {
    pub strike: f64,
    pub call_price: f64,
    pub put_price: f64,
}

impl StrikeRow {
    pub fn new(strike: f64, call_price: f64, put_price: f64) -> Self {
        StrikeRow {
            strike,
            call_price,
            put_price,
        }
    }
}

/// Validated, ordered set of strike rows.
///
/// Strikes are unique and every value is finite. Row order is the input order
/// and is the index space used by the scenario grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StrikeGrid {
    rows: Vec<StrikeRow>,
}

impl StrikeGrid {
    /// Build a grid, rejecting empty input, duplicate strikes and non-finite values
    pub fn new(rows: Vec<StrikeRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(PayoffOptError::Configuration(
                "strike list is empty".to_string(),
            ));
        }

        for (idx, row) in rows.iter().enumerate() {
            if !row.strike.is_finite() || !row.call_price.is_finite() || !row.put_price.is_finite() {
                return Err(PayoffOptError::Configuration(format!(
                    "row {} has a non-finite value: {:?}",
                    idx, row
                )));
            }
        }

        let mut strikes: Vec<f64> = rows.iter().map(|r| r.strike).collect();
        strikes.sort_by(f64::total_cmp);
        if let Some(dup) = strikes.windows(2).find(|w| w[0] == w[1]) {
            return Err(PayoffOptError::Configuration(format!(
                "duplicate strike {}",
                format_level(dup[0])
            )));
        }

        Ok(StrikeGrid { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StrikeRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&StrikeRow> {
        self.rows.get(index)
    }

    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.strike)
    }

    /// Position of a strike in the grid
    pub fn index_of(&self, strike: f64) -> Option<usize> {
        self.rows.iter().position(|r| r.strike == strike)
    }
}

impl<'de> Deserialize<'de> for StrikeGrid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<StrikeRow>::deserialize(deserializer)?;
        StrikeGrid::new(rows).map_err(serde::de::Error::custom)
    }
}

/// Render a price level the way it appears in keys and variable names:
/// integral values without a fractional part, everything else as-is.
pub fn format_level(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
