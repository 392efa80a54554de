//! The six balance-sheet risk factors.
//!
//! Each factor has a natural-range ceiling used for normalization and a
//! fixed weight in the stress score (see [`crate::weights`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StressError;
use crate::weights::STRESS_WEIGHTS;

/// Number of risk factors in the model.
pub const FACTOR_COUNT: usize = 6;

/// A single risk factor of the stress model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    /// Interest-rate shock in percentage points.
    RateShock,
    /// Share of deposits that are uninsured.
    Uninsured,
    /// Weighted-average asset duration in years.
    Duration,
    /// Unrealized mark-to-market loss as a percentage of book.
    Losses,
    /// Relative speed of deposit outflow.
    Withdrawal,
    /// Depositor and sector concentration.
    Concentration,
}

impl Factor {
    /// All factors in model order.
    pub const ALL: [Factor; FACTOR_COUNT] = [
        Factor::RateShock,
        Factor::Uninsured,
        Factor::Duration,
        Factor::Losses,
        Factor::Withdrawal,
        Factor::Concentration,
    ];

    /// Position of the factor in model order.
    pub const fn index(self) -> usize {
        match self {
            Factor::RateShock => 0,
            Factor::Uninsured => 1,
            Factor::Duration => 2,
            Factor::Losses => 3,
            Factor::Withdrawal => 4,
            Factor::Concentration => 5,
        }
    }

    /// Natural-range ceiling; a raw value equal to this normalizes to 1.
    pub const fn ceiling(self) -> f64 {
        match self {
            Factor::RateShock => 6.0,
            Factor::Uninsured => 100.0,
            Factor::Duration => 10.0,
            Factor::Losses => 120.0,
            Factor::Withdrawal => 100.0,
            Factor::Concentration => 100.0,
        }
    }

    /// Weight of the factor in the stress score.
    pub const fn weight(self) -> u32 {
        STRESS_WEIGHTS.get(self)
    }

    /// Serialized field name on [`crate::StressInputs`].
    pub const fn field_name(self) -> &'static str {
        match self {
            Factor::RateShock => "rateShockPct",
            Factor::Uninsured => "uninsuredPct",
            Factor::Duration => "durationYears",
            Factor::Losses => "unrealizedLossPctCap",
            Factor::Withdrawal => "withdrawalSpeed",
            Factor::Concentration => "concentration",
        }
    }

    /// Short command-line key.
    pub const fn key(self) -> &'static str {
        match self {
            Factor::RateShock => "rate-shock",
            Factor::Uninsured => "uninsured",
            Factor::Duration => "duration",
            Factor::Losses => "losses",
            Factor::Withdrawal => "withdrawal",
            Factor::Concentration => "concentration",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Factor::RateShock => "Rate shock",
            Factor::Uninsured => "Uninsured deposits",
            Factor::Duration => "Asset duration",
            Factor::Losses => "Unrealized losses",
            Factor::Withdrawal => "Withdrawal speed",
            Factor::Concentration => "Concentration",
        }
    }

    /// Unit suffix for raw values.
    pub const fn unit(self) -> &'static str {
        match self {
            Factor::RateShock => "pp",
            Factor::Uninsured | Factor::Losses => "%",
            Factor::Duration => "y",
            Factor::Withdrawal | Factor::Concentration => "",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Factor {
    type Err = StressError;

    /// Accepts the short key, the serialized field name, or a few aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "rate-shock" | "rateshock" | "rateshockpct" | "rate" => Ok(Factor::RateShock),
            "uninsured" | "uninsuredpct" => Ok(Factor::Uninsured),
            "duration" | "durationyears" => Ok(Factor::Duration),
            "losses" | "loss" | "unrealizedlosspctcap" | "unrealized-loss" => Ok(Factor::Losses),
            "withdrawal" | "withdrawalspeed" | "withdrawal-speed" => Ok(Factor::Withdrawal),
            "concentration" => Ok(Factor::Concentration),
            _ => Err(StressError::UnknownFactor(s.to_string())),
        }
    }
}
