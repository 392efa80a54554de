//! Raw model inputs.

use serde::{Deserialize, Serialize};

use crate::error::{StressError, StressOutcome};
use crate::factor::{Factor, FACTOR_COUNT};

/// One consistent snapshot of the six raw risk-factor values.
///
/// Values outside the natural ranges are accepted and clamped during
/// normalization. Deserialization requires all six fields; a missing field
/// is an error rather than a silent zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StressInputs {
    /// Interest-rate shock, percentage points (0–6).
    pub rate_shock_pct: f64,
    /// Share of deposits uninsured, percent (0–100).
    pub uninsured_pct: f64,
    /// Weighted-average asset duration, years (0–10).
    pub duration_years: f64,
    /// Unrealized mark-to-market loss, percent of book (0–120).
    pub unrealized_loss_pct_cap: f64,
    /// Relative speed of deposit outflow (0–100).
    pub withdrawal_speed: f64,
    /// Depositor and sector concentration (0–100).
    pub concentration: f64,
}

impl StressInputs {
    /// Creates an input snapshot from raw values in model order.
    pub const fn new(
        rate_shock_pct: f64,
        uninsured_pct: f64,
        duration_years: f64,
        unrealized_loss_pct_cap: f64,
        withdrawal_speed: f64,
        concentration: f64,
    ) -> Self {
        Self {
            rate_shock_pct,
            uninsured_pct,
            duration_years,
            unrealized_loss_pct_cap,
            withdrawal_speed,
            concentration,
        }
    }

    /// All factors at zero.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// All factors at their natural-range ceilings.
    pub const fn ceilings() -> Self {
        Self::new(
            Factor::RateShock.ceiling(),
            Factor::Uninsured.ceiling(),
            Factor::Duration.ceiling(),
            Factor::Losses.ceiling(),
            Factor::Withdrawal.ceiling(),
            Factor::Concentration.ceiling(),
        )
    }

    /// Builds inputs from an array in model order.
    pub const fn from_array(values: [f64; FACTOR_COUNT]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4], values[5])
    }

    /// Raw values in model order.
    pub const fn to_array(&self) -> [f64; FACTOR_COUNT] {
        [
            self.rate_shock_pct,
            self.uninsured_pct,
            self.duration_years,
            self.unrealized_loss_pct_cap,
            self.withdrawal_speed,
            self.concentration,
        ]
    }

    /// Raw value of one factor.
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::RateShock => self.rate_shock_pct,
            Factor::Uninsured => self.uninsured_pct,
            Factor::Duration => self.duration_years,
            Factor::Losses => self.unrealized_loss_pct_cap,
            Factor::Withdrawal => self.withdrawal_speed,
            Factor::Concentration => self.concentration,
        }
    }

    /// Sets the raw value of one factor.
    pub fn set(&mut self, factor: Factor, value: f64) {
        let slot = match factor {
            Factor::RateShock => &mut self.rate_shock_pct,
            Factor::Uninsured => &mut self.uninsured_pct,
            Factor::Duration => &mut self.duration_years,
            Factor::Losses => &mut self.unrealized_loss_pct_cap,
            Factor::Withdrawal => &mut self.withdrawal_speed,
            Factor::Concentration => &mut self.concentration,
        };
        *slot = value;
    }

    /// Returns a copy with one factor replaced.
    #[must_use]
    pub fn with(mut self, factor: Factor, value: f64) -> Self {
        self.set(factor, value);
        self
    }

    /// Returns true when every field is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Fails on the first non-finite field.
    ///
    /// The model itself is total over non-finite values; this is for input
    /// sources that want to reject a malformed snapshot instead of scoring it.
    pub fn validate(&self) -> StressOutcome<()> {
        for factor in Factor::ALL {
            let value = self.get(factor);
            if !value.is_finite() {
                return Err(StressError::non_finite(factor.field_name(), value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut inputs = StressInputs::zero();
        for (i, factor) in Factor::ALL.iter().enumerate() {
            inputs.set(*factor, i as f64 + 1.0);
        }
        assert_eq!(inputs.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(inputs.get(Factor::Losses), 4.0);
    }

    #[test]
    fn test_with_leaves_original() {
        let base = StressInputs::zero();
        let bumped = base.with(Factor::Uninsured, 50.0);
        assert_eq!(base.uninsured_pct, 0.0);
        assert_eq!(bumped.uninsured_pct, 50.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(StressInputs::ceilings().validate().is_ok());

        let err = StressInputs::zero()
            .with(Factor::Duration, f64::INFINITY)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            StressError::NonFiniteInput { field: "durationYears", .. }
        ));

        assert!(!StressInputs::zero().with(Factor::Losses, f64::NAN).is_finite());
    }

    #[test]
    fn test_out_of_range_is_not_invalid() {
        let inputs = StressInputs::new(-3.0, 250.0, 40.0, 500.0, -1.0, 1e9);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_serde_field_names() {
        let json = r#"{
            "rateShockPct": 2.5,
            "uninsuredPct": 80,
            "durationYears": 6.5,
            "unrealizedLossPctCap": 65,
            "withdrawalSpeed": 85,
            "concentration": 85
        }"#;
        let inputs: StressInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs, StressInputs::new(2.5, 80.0, 6.5, 65.0, 85.0, 85.0));
    }

    #[test]
    fn test_serde_requires_every_field() {
        let json = r#"{ "rateShockPct": 2.5, "uninsuredPct": 80 }"#;
        assert!(serde_json::from_str::<StressInputs>(json).is_err());
    }
}
