//! CLI command implementations.

pub mod config;
pub mod evaluate;
pub mod presets;
pub mod session;
pub mod sweep;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use evaluate::EvaluateArgs;
pub use presets::PresetsArgs;
pub use session::SessionArgs;
pub use sweep::SweepArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use convex_stress::{Factor, Preset, StressInputs};

use crate::error::{CliError, CliResult};

/// Where an input snapshot came from.
pub fn describe_source(args: &InputArgs, default_preset: Preset) -> String {
    let base = match (&args.input, args.preset) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(preset)) => preset.name().to_string(),
        (None, None) => default_preset.name().to_string(),
    };
    if args.overrides().is_empty() {
        base
    } else {
        format!("{} (adjusted)", base)
    }
}

/// Shared arguments describing one input snapshot.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Start from a preset (svb, stable, rateShock, run)
    #[arg(short, long, conflicts_with = "input")]
    pub preset: Option<Preset>,

    /// Start from a JSON file with all six fields
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Interest-rate shock, percentage points (0-6)
    #[arg(long, allow_negative_numbers = true)]
    pub rate_shock: Option<f64>,

    /// Uninsured deposit share, percent (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub uninsured: Option<f64>,

    /// Weighted-average asset duration, years (0-10)
    #[arg(long, allow_negative_numbers = true)]
    pub duration: Option<f64>,

    /// Unrealized loss, percent of book (0-120)
    #[arg(long, allow_negative_numbers = true)]
    pub losses: Option<f64>,

    /// Withdrawal speed (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub withdrawal: Option<f64>,

    /// Depositor concentration (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub concentration: Option<f64>,
}

impl InputArgs {
    /// Per-field overrides given on the command line.
    pub fn overrides(&self) -> Vec<(Factor, f64)> {
        [
            (Factor::RateShock, self.rate_shock),
            (Factor::Uninsured, self.uninsured),
            (Factor::Duration, self.duration),
            (Factor::Losses, self.losses),
            (Factor::Withdrawal, self.withdrawal),
            (Factor::Concentration, self.concentration),
        ]
        .into_iter()
        .filter_map(|(factor, value)| value.map(|v| (factor, v)))
        .collect()
    }

    /// Builds a validated snapshot: file or preset first, then overrides.
    pub fn resolve(&self, default_preset: Preset) -> CliResult<StressInputs> {
        let mut inputs = match (&self.input, self.preset) {
            (Some(path), _) => load_inputs(path)?,
            (None, Some(preset)) => preset.inputs(),
            (None, None) => default_preset.inputs(),
        };
        for (factor, value) in self.overrides() {
            inputs.set(factor, value);
        }
        inputs.validate()?;
        tracing::debug!(?inputs, "resolved input snapshot");
        Ok(inputs)
    }
}

/// Reads a JSON input snapshot.
pub fn load_inputs(path: &Path) -> CliResult<StressInputs> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Parses a number, naming the field on failure.
pub fn parse_number(field: &str, value: &str) -> CliResult<f64> {
    value.trim().parse::<f64>().map_err(|_| CliError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}
