//! Sweep command implementation.
//!
//! Walks one factor from zero to its ceiling with the others held fixed.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use convex_stress::{sweep, tier_crossings, Factor, RiskTier, SweepPoint};

use crate::cli::OutputFormat;
use crate::commands::{describe_source, InputArgs};
use crate::output::{bar, print_csv, print_header, print_info, print_json, print_table, tier_label};
use crate::settings::Settings;

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Factor to sweep (rate-shock, uninsured, duration, losses, withdrawal, concentration)
    pub factor: Factor,

    /// Number of equal intervals between zero and the ceiling
    #[arg(short, long, default_value = "10")]
    pub steps: usize,

    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(Debug, Tabled)]
struct SweepRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Duration Loss")]
    duration_loss: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Crossing {
    tier: RiskTier,
    value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepOutput {
    factor: Factor,
    base: String,
    points: Vec<SweepPoint>,
    crossings: Vec<Crossing>,
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs, settings: &Settings) -> Result<()> {
    let base = args.inputs.resolve(settings.default_preset)?;
    let source = describe_source(&args.inputs, settings.default_preset);
    let points = sweep(&base, args.factor, args.steps)?;
    let crossings = tier_crossings(&points);
    tracing::debug!(factor = args.factor.key(), steps = args.steps, "sweep complete");

    match settings.format {
        OutputFormat::Table => {
            print_header(&format!("Sweep: {} from {}", args.factor.label(), source));
            let rows: Vec<SweepRow> = points
                .iter()
                .map(|p| SweepRow {
                    value: format!("{}{}", settings.num(p.value), args.factor.unit()),
                    score: settings.num(p.score),
                    tier: tier_label(p.tier).to_string(),
                    duration_loss: settings.num(p.duration_loss_pct),
                    bar: bar(p.score / 100.0, 20),
                })
                .collect();
            print_table(&rows)?;
            if !settings.quiet {
                if crossings.is_empty() {
                    print_info("No tier change across the range");
                }
                for (tier, value) in &crossings {
                    print_info(&format!(
                        "{} reached at {} = {}{}",
                        tier.label(),
                        args.factor.key(),
                        settings.num(*value),
                        args.factor.unit()
                    ));
                }
            }
        }
        OutputFormat::Json => {
            print_json(&SweepOutput {
                factor: args.factor,
                base: source,
                points,
                crossings: crossings
                    .into_iter()
                    .map(|(tier, value)| Crossing { tier, value })
                    .collect(),
            })?;
        }
        OutputFormat::Csv => {
            print_csv(&points)?;
        }
        OutputFormat::Minimal => {
            for p in &points {
                println!("{} {}", settings.num(p.value), settings.num(p.score));
            }
        }
    }

    Ok(())
}
