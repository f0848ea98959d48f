mod strike;
mod payoff;
mod limits;
mod error;

pub use strike::{format_level, StrikeGrid, StrikeRow};
pub use payoff::{PayoffQuad, PositionKind};
pub use limits::PositionLimits;
pub use error::{PayoffOptError, Result};

#[cfg(test)]
mod tests;
