//! # Convex Stress
//!
//! A transparent, explainable stress score for a hypothetical bank balance
//! sheet. Six risk-factor inputs are normalized, weighted and summed into a
//! 0–100 score, which is classified into a risk tier. A crude duration-loss
//! estimate is reported alongside, and a bounded rolling history feeds a
//! time-series view.
//!
//! This is an illustrative heuristic, not a calibrated risk model.
//!
//! - **Model**: [`normalize`], [`score`], [`classify`], [`interpret`],
//!   [`estimate_duration_loss`], [`evaluate`]
//! - **History**: [`HistoryBuffer`] capped at [`HISTORY_CAPACITY`] samples
//! - **Cycle**: [`StressMonitor::recompute`] evaluates and records in one step
//! - **Presets**: `svb`, `stable`, `rateShock`, `run`
//! - **Sensitivity**: one-factor [`sweep`]s
//!
//! ## Example
//!
//! ```rust
//! use convex_stress::prelude::*;
//!
//! let result = evaluate(&Preset::Svb.inputs());
//! assert_eq!(result.tier, RiskTier::AtRisk);
//! assert!((result.score - 67.55).abs() < 1e-9);
//! assert!((result.duration_loss_pct - 16.25).abs() < 1e-12);
//!
//! let mut monitor = StressMonitor::new();
//! monitor.recompute(Preset::Stable.inputs(), "09:30:00");
//! assert_eq!(monitor.history().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod factor;
pub mod history;
pub mod inputs;
pub mod model;
pub mod monitor;
pub mod presets;
pub mod sensitivity;
pub mod tier;
pub mod weights;

pub use error::{StressError, StressOutcome};
pub use factor::{Factor, FACTOR_COUNT};
pub use history::{HistoryBuffer, HistorySample, SharedHistory, HISTORY_CAPACITY};
pub use inputs::StressInputs;
pub use model::{
    estimate_duration_loss, evaluate, normalize, score, score_factors, Driver, NormalizedFactors,
    StressResult,
};
pub use monitor::{Evaluation, StressMonitor};
pub use presets::Preset;
pub use sensitivity::{sweep, tier_crossings, SweepPoint};
pub use tier::{classify, interpret, RiskTier, AT_RISK_THRESHOLD, CRITICAL_THRESHOLD};
pub use weights::{StressWeights, STRESS_WEIGHTS, WEIGHT_TOTAL};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::history::{HistoryBuffer, HistorySample, HISTORY_CAPACITY};
    pub use crate::inputs::StressInputs;
    pub use crate::model::{estimate_duration_loss, evaluate, normalize, score, StressResult};
    pub use crate::monitor::{Evaluation, StressMonitor};
    pub use crate::presets::Preset;
    pub use crate::tier::{classify, RiskTier};
    pub use crate::{Factor, StressError};
}
