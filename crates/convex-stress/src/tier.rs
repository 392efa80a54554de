//! Risk tier classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest score classified as [`RiskTier::AtRisk`].
pub const AT_RISK_THRESHOLD: f64 = 40.0;

/// Lowest score classified as [`RiskTier::Critical`].
pub const CRITICAL_THRESHOLD: f64 = 70.0;

/// Discrete risk tier derived from a stress score.
///
/// Tiers are ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    /// Score in `[0, 40)`.
    Stable,
    /// Score in `[40, 70)`.
    AtRisk,
    /// Score in `[70, 100]`.
    Critical,
}

impl RiskTier {
    /// All tiers from least to most severe.
    pub const ALL: [RiskTier; 3] = [RiskTier::Stable, RiskTier::AtRisk, RiskTier::Critical];

    /// Classifies a score. Boundaries are inclusive-low; NaN is Stable.
    pub fn classify(score: f64) -> Self {
        if score >= CRITICAL_THRESHOLD {
            RiskTier::Critical
        } else if score >= AT_RISK_THRESHOLD {
            RiskTier::AtRisk
        } else {
            RiskTier::Stable
        }
    }

    /// Lowest score belonging to this tier.
    pub const fn lower_bound(self) -> f64 {
        match self {
            RiskTier::Stable => 0.0,
            RiskTier::AtRisk => AT_RISK_THRESHOLD,
            RiskTier::Critical => CRITICAL_THRESHOLD,
        }
    }

    /// Fixed explanatory sentence for the tier.
    pub const fn interpretation(self) -> &'static str {
        match self {
            RiskTier::Stable => {
                "Stable: funding looks sticky and rate exposure is contained. \
                 A shock of this size should be absorbed without forced asset sales."
            }
            RiskTier::AtRisk => {
                "At risk: rate losses and flighty funding reinforce each other. \
                 A faster outflow could force securities to be sold at a loss."
            }
            RiskTier::Critical => {
                "Critical: the balance sheet resembles a bank-run profile. \
                 Uninsured depositors have both the motive and the speed to leave."
            }
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Stable => "Stable",
            RiskTier::AtRisk => "At Risk",
            RiskTier::Critical => "Critical",
        }
    }

    /// Machine-readable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskTier::Stable => "stable",
            RiskTier::AtRisk => "at-risk",
            RiskTier::Critical => "critical",
        }
    }
}

/// Classifies a stress score into a tier.
pub fn classify(score: f64) -> RiskTier {
    RiskTier::classify(score)
}

/// Canned interpretation for a tier.
pub fn interpret(tier: RiskTier) -> &'static str {
    tier.interpretation()
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "stable" => Ok(RiskTier::Stable),
            "at-risk" | "atrisk" => Ok(RiskTier::AtRisk),
            "critical" => Ok(RiskTier::Critical),
            _ => Err(format!("Unknown risk tier: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0.0), RiskTier::Stable);
        assert_eq!(classify(39.999_999), RiskTier::Stable);
        assert_eq!(classify(40.0), RiskTier::AtRisk);
        assert_eq!(classify(69.999_999), RiskTier::AtRisk);
        assert_eq!(classify(70.0), RiskTier::Critical);
        assert_eq!(classify(100.0), RiskTier::Critical);
    }

    #[test]
    fn test_next_down_from_threshold() {
        // Largest double below each threshold.
        let below_40 = f64::from_bits(AT_RISK_THRESHOLD.to_bits() - 1);
        let below_70 = f64::from_bits(CRITICAL_THRESHOLD.to_bits() - 1);
        assert_eq!(classify(below_40), RiskTier::Stable);
        assert_eq!(classify(below_70), RiskTier::AtRisk);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(classify(-5.0), RiskTier::Stable);
        assert_eq!(classify(150.0), RiskTier::Critical);
        assert_eq!(classify(f64::NAN), RiskTier::Stable);
    }

    #[test]
    fn test_interpretations_are_distinct() {
        let texts: Vec<&str> = RiskTier::ALL.iter().map(|t| interpret(*t)).collect();
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_ne!(texts[0], texts[2]);
    }

    #[test]
    fn test_ordering_and_bounds() {
        assert!(RiskTier::Stable < RiskTier::AtRisk);
        assert!(RiskTier::AtRisk < RiskTier::Critical);
        for tier in RiskTier::ALL {
            assert_eq!(classify(tier.lower_bound()), tier);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("at risk".parse::<RiskTier>().unwrap(), RiskTier::AtRisk);
        assert_eq!("Critical".parse::<RiskTier>().unwrap(), RiskTier::Critical);
        assert!("doomed".parse::<RiskTier>().is_err());
    }
}
