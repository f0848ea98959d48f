//! Shared fixtures for the cross-crate pipeline tests

use payoffopt_types::{StrikeGrid, StrikeRow};

/// Three-strike chain used throughout the pipeline tests
pub const THREE_STRIKE_CHAIN: &str = "Price_CALL;Price_PUT;Strike\n\
                                      120;35;2900\n\
                                      85;50;2950\n\
                                      55;70;3000\n";

pub fn three_strike_grid() -> payoffopt_types::Result<StrikeGrid> {
    StrikeGrid::new(vec![
        StrikeRow::new(2900.0, 120.0, 35.0),
        StrikeRow::new(2950.0, 85.0, 50.0),
        StrikeRow::new(3000.0, 55.0, 70.0),
    ])
}

/// Evenly spaced chain with monotone call/put prices
pub fn synthetic_grid(n: usize) -> payoffopt_types::Result<StrikeGrid> {
    let rows = (0..n)
        .map(|i| {
            let strike = 2800.0 + 25.0 * i as f64;
            let call = (150.0 - 8.0 * i as f64).max(1.0);
            let put = 10.0 + 8.0 * i as f64;
            StrikeRow::new(strike, call, put)
        })
        .collect();
    StrikeGrid::new(rows)
}
