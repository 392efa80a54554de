//! Built-in scenario presets.
//!
//! Presets are plain data: applying one overwrites the whole input snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StressError;
use crate::inputs::StressInputs;

/// A named, fixed input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Long-duration securities funded by concentrated, uninsured deposits.
    #[default]
    Svb,
    /// Sticky insured funding, short book.
    Stable,
    /// Large parallel rate move against a long book.
    RateShock,
    /// Fast deposit flight from a concentrated, mostly uninsured base.
    Run,
}

/// The `svb` preset inputs.
pub const SVB: StressInputs = StressInputs::new(2.5, 80.0, 6.5, 65.0, 85.0, 85.0);

/// The `stable` preset inputs.
pub const STABLE: StressInputs = StressInputs::new(1.0, 25.0, 3.0, 15.0, 25.0, 30.0);

/// The `rateShock` preset inputs.
pub const RATE_SHOCK: StressInputs = StressInputs::new(5.0, 40.0, 8.0, 90.0, 45.0, 40.0);

/// The `run` preset inputs.
pub const RUN: StressInputs = StressInputs::new(3.0, 95.0, 5.0, 60.0, 100.0, 95.0);

impl Preset {
    /// All presets in catalog order.
    pub const ALL: [Preset; 4] = [Preset::Svb, Preset::Stable, Preset::RateShock, Preset::Run];

    /// Catalog name.
    pub const fn name(self) -> &'static str {
        match self {
            Preset::Svb => "svb",
            Preset::Stable => "stable",
            Preset::RateShock => "rateShock",
            Preset::Run => "run",
        }
    }

    /// Short description.
    pub const fn description(self) -> &'static str {
        match self {
            Preset::Svb => "Long securities book funded by concentrated uninsured deposits",
            Preset::Stable => "Granular insured funding and a short asset book",
            Preset::RateShock => "500bp shock against a long-duration book",
            Preset::Run => "Fast flight of a concentrated uninsured deposit base",
        }
    }

    /// The preset's input snapshot.
    pub const fn inputs(self) -> StressInputs {
        match self {
            Preset::Svb => SVB,
            Preset::Stable => STABLE,
            Preset::RateShock => RATE_SHOCK,
            Preset::Run => RUN,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "svb" => Ok(Preset::Svb),
            "stable" => Ok(Preset::Stable),
            "rateshock" => Ok(Preset::RateShock),
            "run" => Ok(Preset::Run),
            _ => Err(StressError::UnknownPreset(s.to_string())),
        }
    }
}

impl From<Preset> for StressInputs {
    fn from(preset: Preset) -> Self {
        preset.inputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::evaluate;
    use crate::tier::RiskTier;

    #[test]
    fn test_catalog_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("rate-shock".parse::<Preset>().unwrap(), Preset::RateShock);
        assert_eq!("SVB".parse::<Preset>().unwrap(), Preset::Svb);
        assert!("lehman".parse::<Preset>().is_err());
    }

    #[test]
    fn test_preset_tiers() {
        assert_eq!(evaluate(&Preset::Svb.inputs()).tier, RiskTier::AtRisk);
        assert_eq!(evaluate(&Preset::Stable.inputs()).tier, RiskTier::Stable);
        assert_eq!(evaluate(&Preset::RateShock.inputs()).tier, RiskTier::AtRisk);
        assert_eq!(evaluate(&Preset::Run.inputs()).tier, RiskTier::Critical);
    }

    #[test]
    fn test_presets_are_finite_and_in_range() {
        for preset in Preset::ALL {
            let inputs = preset.inputs();
            assert!(inputs.validate().is_ok());
            for factor in crate::Factor::ALL {
                let v = inputs.get(factor);
                assert!((0.0..=factor.ceiling()).contains(&v), "{} {}", preset, factor);
            }
        }
    }

    #[test]
    fn test_serde_uses_catalog_names() {
        assert_eq!(serde_json::to_string(&Preset::RateShock).unwrap(), "\"rateShock\"");
    }
}
