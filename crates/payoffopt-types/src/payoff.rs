use serde::{Deserialize, Serialize};

/// Direction and side of an option position within a scenario cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PositionKind {
    CallBuy,
    CallSell,
    PutBuy,
    PutSell,
}

impl PositionKind {
    /// Cell order: call buy, call sell, put buy, put sell
    pub const ALL: [PositionKind; 4] = [
        PositionKind::CallBuy,
        PositionKind::CallSell,
        PositionKind::PutBuy,
        PositionKind::PutSell,
    ];

    pub fn all() -> &'static [PositionKind] {
        &Self::ALL
    }

    pub fn index(self) -> usize {
        match self {
            PositionKind::CallBuy => 0,
            PositionKind::CallSell => 1,
            PositionKind::PutBuy => 2,
            PositionKind::PutSell => 3,
        }
    }

    pub fn is_call(self) -> bool {
        matches!(self, PositionKind::CallBuy | PositionKind::CallSell)
    }

    pub fn is_long(self) -> bool {
        matches!(self, PositionKind::CallBuy | PositionKind::PutBuy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PositionKind::CallBuy => "call_buy",
            PositionKind::CallSell => "call_sell",
            PositionKind::PutBuy => "put_buy",
            PositionKind::PutSell => "put_sell",
        }
    }
}

impl std::fmt::Display for PositionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-contract payoff of the four positions opened at `purchase_strike`
/// when the underlying settles at `expiration_strike`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PayoffQuad {
    pub long_call: f64,
    pub short_call: f64,
    pub long_put: f64,
    pub short_put: f64,
}

impl PayoffQuad {
    pub fn at_expiration(purchase_strike: f64, expiration_strike: f64) -> Self {
        PayoffQuad {
            long_call: (expiration_strike - purchase_strike).max(0.0),
            short_call: (purchase_strike - expiration_strike).min(0.0),
            long_put: (purchase_strike - expiration_strike).max(0.0),
            short_put: (expiration_strike - purchase_strike).min(0.0),
        }
    }

    pub fn get(&self, kind: PositionKind) -> f64 {
        match kind {
            PositionKind::CallBuy => self.long_call,
            PositionKind::CallSell => self.short_call,
            PositionKind::PutBuy => self.long_put,
            PositionKind::PutSell => self.short_put,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.long_call, self.short_call, self.long_put, self.short_put]
    }
}
