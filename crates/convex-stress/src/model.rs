//! The stress scoring model.
//!
//! A transparent linear heuristic: each raw input is normalized to `[0, 1]`
//! against its natural-range ceiling, then combined with fixed integer
//! weights summing to 100.
//!
//! ## Formula
//!
//! ```text
//! normalized[i] = clamp(raw[i] / ceiling[i], 0, 1)
//! score         = clamp(Σ weight[i] × normalized[i], 0, 100)
//! duration_loss = clamp(duration_years × rate_shock_pct, 0, 100)
//! ```
//!
//! Every function here is total. NaN in any position is treated as the
//! range minimum.

use serde::{Deserialize, Serialize};

use crate::factor::{Factor, FACTOR_COUNT};
use crate::inputs::StressInputs;
use crate::tier::RiskTier;

/// Lowest possible stress score.
pub const SCORE_MIN: f64 = 0.0;

/// Highest possible stress score.
pub const SCORE_MAX: f64 = 100.0;

/// Upper bound of the duration-loss estimate, in percent.
pub const DURATION_LOSS_CAP: f64 = 100.0;

/// Clamps into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
fn clamp_or_floor(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Inputs normalized to `[0, 1]` against their ceilings.
///
/// This is also the six-bar driver chart: each bar is one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFactors {
    /// Normalized rate shock.
    pub rate_shock: f64,
    /// Normalized uninsured deposit share.
    pub uninsured: f64,
    /// Normalized asset duration.
    pub duration: f64,
    /// Normalized unrealized losses.
    pub losses: f64,
    /// Normalized withdrawal speed.
    pub withdrawal: f64,
    /// Normalized concentration.
    pub concentration: f64,
}

impl NormalizedFactors {
    /// Normalized value of one factor.
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::RateShock => self.rate_shock,
            Factor::Uninsured => self.uninsured,
            Factor::Duration => self.duration,
            Factor::Losses => self.losses,
            Factor::Withdrawal => self.withdrawal,
            Factor::Concentration => self.concentration,
        }
    }

    /// Values in model order.
    pub const fn to_array(&self) -> [f64; FACTOR_COUNT] {
        [
            self.rate_shock,
            self.uninsured,
            self.duration,
            self.losses,
            self.withdrawal,
            self.concentration,
        ]
    }

    /// `(factor, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Unclamped weighted sum of the factors.
    pub fn weighted_sum(&self) -> f64 {
        self.iter()
            .map(|(factor, value)| f64::from(factor.weight()) * value)
            .sum()
    }

    /// Per-factor contributions to the score, in model order.
    pub fn drivers(&self) -> Vec<Driver> {
        self.iter()
            .map(|(factor, normalized)| Driver::new(factor, normalized))
            .collect()
    }

    /// Contributions sorted from largest to smallest.
    ///
    /// Ties keep model order.
    pub fn ranked_drivers(&self) -> Vec<Driver> {
        let mut drivers = self.drivers();
        drivers.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        drivers
    }
}

/// One factor's share of the stress score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// The factor.
    pub factor: Factor,
    /// Its weight.
    pub weight: u32,
    /// Normalized value in `[0, 1]`.
    pub normalized: f64,
    /// `weight × normalized`, in score points.
    pub contribution: f64,
}

impl Driver {
    fn new(factor: Factor, normalized: f64) -> Self {
        let weight = factor.weight();
        Self {
            factor,
            weight,
            normalized,
            contribution: f64::from(weight) * normalized,
        }
    }
}

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressResult {
    /// Stress score in `[0, 100]`.
    pub score: f64,
    /// Tier of the score.
    pub tier: RiskTier,
    /// Canned sentence for the tier.
    pub interpretation: String,
    /// Duration-loss estimate in `[0, 100]`, independent of the score.
    pub duration_loss_pct: f64,
}

/// Normalizes each input against its ceiling and clamps to `[0, 1]`.
pub fn normalize(inputs: &StressInputs) -> NormalizedFactors {
    let n = |factor: Factor| clamp_or_floor(inputs.get(factor) / factor.ceiling(), 0.0, 1.0);
    NormalizedFactors {
        rate_shock: n(Factor::RateShock),
        uninsured: n(Factor::Uninsured),
        duration: n(Factor::Duration),
        losses: n(Factor::Losses),
        withdrawal: n(Factor::Withdrawal),
        concentration: n(Factor::Concentration),
    }
}

/// Stress score of already-normalized factors, clamped to `[0, 100]`.
pub fn score_factors(factors: &NormalizedFactors) -> f64 {
    clamp_or_floor(factors.weighted_sum(), SCORE_MIN, SCORE_MAX)
}

/// Stress score of raw inputs, clamped to `[0, 100]`.
pub fn score(inputs: &StressInputs) -> f64 {
    score_factors(&normalize(inputs))
}

/// Crude duration-loss proxy: `duration × Δrate`, clamped to `[0, 100]`.
///
/// Reported alongside the score, never folded into it.
pub fn estimate_duration_loss(duration_years: f64, rate_shock_pct: f64) -> f64 {
    clamp_or_floor(duration_years * rate_shock_pct, 0.0, DURATION_LOSS_CAP)
}

/// Evaluates the full model for one input snapshot.
pub fn evaluate(inputs: &StressInputs) -> StressResult {
    let score = score(inputs);
    let tier = RiskTier::classify(score);
    StressResult {
        score,
        tier,
        interpretation: tier.interpretation().to_string(),
        duration_loss_pct: estimate_duration_loss(inputs.duration_years, inputs.rate_shock_pct),
    }
}
