//! One-factor sensitivity sweeps.
//!
//! Walks a single factor from zero to its ceiling while holding the others
//! at a base snapshot, re-scoring at each step. Since every weight is
//! positive the resulting score series is non-decreasing.

use serde::{Deserialize, Serialize};

use crate::error::{StressError, StressOutcome};
use crate::factor::Factor;
use crate::inputs::StressInputs;
use crate::model::{estimate_duration_loss, score};
use crate::tier::RiskTier;

/// Largest number of intervals a sweep accepts.
pub const MAX_SWEEP_STEPS: usize = 1_000;

/// One point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    /// Raw value of the swept factor.
    pub value: f64,
    /// Stress score at that value.
    pub score: f64,
    /// Tier of the score.
    pub tier: RiskTier,
    /// Duration-loss estimate at that value.
    pub duration_loss_pct: f64,
}

/// Scores `base` with `factor` set to each of `steps + 1` evenly spaced
/// values from 0 to the factor's ceiling.
pub fn sweep(base: &StressInputs, factor: Factor, steps: usize) -> StressOutcome<Vec<SweepPoint>> {
    if steps == 0 {
        return Err(StressError::invalid_sweep("steps must be at least 1"));
    }
    if steps > MAX_SWEEP_STEPS {
        return Err(StressError::invalid_sweep(format!(
            "steps must be at most {}",
            MAX_SWEEP_STEPS
        )));
    }
    base.validate()?;

    let ceiling = factor.ceiling();
    let points = (0..=steps)
        .map(|i| {
            let value = ceiling * i as f64 / steps as f64;
            let inputs = base.with(factor, value);
            let s = score(&inputs);
            SweepPoint {
                value,
                score: s,
                tier: RiskTier::classify(s),
                duration_loss_pct: estimate_duration_loss(
                    inputs.duration_years,
                    inputs.rate_shock_pct,
                ),
            }
        })
        .collect();
    Ok(points)
}

/// First sweep value at which each tier above the starting tier is reached.
pub fn tier_crossings(points: &[SweepPoint]) -> Vec<(RiskTier, f64)> {
    let mut crossings = Vec::new();
    let mut current = match points.first() {
        Some(p) => p.tier,
        None => return crossings,
    };
    for point in &points[1..] {
        // A coarse step can jump straight past a tier; it is reached at the same value.
        crossings.extend(
            RiskTier::ALL
                .iter()
                .filter(|tier| **tier > current && **tier <= point.tier)
                .map(|tier| (*tier, point.value)),
        );
        current = current.max(point.tier);
    }
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_endpoints() {
        let base = Preset::Svb.inputs();
        let points = sweep(&base, Factor::Uninsured, 10).unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[10].value, 100.0);
        assert_relative_eq!(points[10].score - points[0].score, 22.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_is_monotone() {
        for factor in Factor::ALL {
            let points = sweep(&Preset::Stable.inputs(), factor, 50).unwrap();
            assert!(points.windows(2).all(|w| w[1].score >= w[0].score), "{}", factor);
        }
    }

    #[test]
    fn test_sweep_duration_loss_tracks_rate() {
        let points = sweep(&Preset::Svb.inputs(), Factor::RateShock, 6).unwrap();
        assert_relative_eq!(points[6].duration_loss_pct, 39.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_rejects_bad_requests() {
        let base = Preset::Svb.inputs();
        assert!(sweep(&base, Factor::Duration, 0).is_err());
        assert!(sweep(&base, Factor::Duration, MAX_SWEEP_STEPS + 1).is_err());
        let bad = base.with(Factor::Losses, f64::NAN);
        assert!(matches!(
            sweep(&bad, Factor::Duration, 4),
            Err(StressError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn test_tier_crossings() {
        // Without withdrawal svb scores 53.1; full withdrawal adds 17 points.
        let points = sweep(&Preset::Svb.inputs(), Factor::Withdrawal, 100).unwrap();
        assert_eq!(points[0].tier, RiskTier::AtRisk);
        let crossings = tier_crossings(&points);
        assert_eq!(crossings, vec![(RiskTier::Critical, 100.0)]);

        let points = sweep(&Preset::Stable.inputs(), Factor::Uninsured, 20).unwrap();
        assert!(tier_crossings(&points).is_empty());
    }

    #[test]
    fn test_tier_crossings_report_skipped_tier() {
        let point = |value: f64, score: f64| SweepPoint {
            value,
            score,
            tier: RiskTier::classify(score),
            duration_loss_pct: 0.0,
        };
        let points = [
            point(0.0, 10.0),
            point(1.0, 80.0),
            point(2.0, 50.0),
            point(3.0, 90.0),
        ];
        assert_eq!(
            tier_crossings(&points),
            vec![(RiskTier::AtRisk, 1.0), (RiskTier::Critical, 1.0)]
        );
    }

    #[test]
    fn test_tier_crossings_empty() {
        assert!(tier_crossings(&[]).is_empty());
    }
}
