//! Fixed factor weights of the stress score.
//!
//! The weights are integers summing to exactly [`WEIGHT_TOTAL`], so a
//! weighted sum of factors normalized to `[0, 1]` already lies in
//! `[0, 100]`. The sum is checked at compile time; editing a weight without
//! rebalancing the others fails the build.

use serde::{Deserialize, Serialize};

use crate::factor::{Factor, FACTOR_COUNT};

/// Required sum of all weights.
pub const WEIGHT_TOTAL: u32 = 100;

/// Per-factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressWeights {
    /// Rate shock weight.
    pub rate_shock: u32,
    /// Uninsured deposit weight.
    pub uninsured: u32,
    /// Asset duration weight.
    pub duration: u32,
    /// Unrealized loss weight.
    pub losses: u32,
    /// Withdrawal speed weight.
    pub withdrawal: u32,
    /// Concentration weight.
    pub concentration: u32,
}

/// The weight table used by the model.
pub const STRESS_WEIGHTS: StressWeights = StressWeights {
    rate_shock: 18,
    uninsured: 22,
    duration: 15,
    losses: 18,
    withdrawal: 17,
    concentration: 10,
};

const _: () = assert!(STRESS_WEIGHTS.total() == WEIGHT_TOTAL);

impl StressWeights {
    /// Weight of a single factor.
    pub const fn get(&self, factor: Factor) -> u32 {
        match factor {
            Factor::RateShock => self.rate_shock,
            Factor::Uninsured => self.uninsured,
            Factor::Duration => self.duration,
            Factor::Losses => self.losses,
            Factor::Withdrawal => self.withdrawal,
            Factor::Concentration => self.concentration,
        }
    }

    /// Sum of all weights.
    pub const fn total(&self) -> u32 {
        self.rate_shock
            + self.uninsured
            + self.duration
            + self.losses
            + self.withdrawal
            + self.concentration
    }

    /// Weights in model order.
    pub fn as_array(&self) -> [u32; FACTOR_COUNT] {
        Factor::ALL.map(|f| self.get(f))
    }
}

impl Default for StressWeights {
    fn default() -> Self {
        STRESS_WEIGHTS
    }
}
