//! Evaluate command implementation.
//!
//! Scores one input snapshot and draws the driver chart.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use convex_stress::{Driver, Evaluation, StressInputs};

use crate::cli::OutputFormat;
use crate::commands::{describe_source, InputArgs};
use crate::output::{
    bar, print_csv, print_header, print_json, print_table, tier_label, KeyValue, BAR_WIDTH,
};
use crate::settings::Settings;

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Sort the driver chart by contribution instead of model order
    #[arg(long)]
    pub ranked: bool,
}

/// One bar of the driver chart.
#[derive(Debug, Tabled)]
struct DriverRow {
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Raw")]
    raw: String,
    #[tabled(rename = "Weight")]
    weight: u32,
    #[tabled(rename = "Normalized")]
    normalized: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "")]
    bar: String,
}

/// JSON document for one evaluation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateOutput<'a> {
    source: String,
    #[serde(flatten)]
    evaluation: &'a Evaluation,
    drivers: Vec<Driver>,
}

/// Flat CSV record for one evaluation.
#[derive(Debug, Serialize)]
struct EvaluateRecord {
    source: String,
    score: f64,
    tier: &'static str,
    duration_loss_pct: f64,
    rate_shock: f64,
    uninsured: f64,
    duration: f64,
    losses: f64,
    withdrawal: f64,
    concentration: f64,
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, settings: &Settings) -> Result<()> {
    let inputs = args.inputs.resolve(settings.default_preset)?;
    let source = describe_source(&args.inputs, settings.default_preset);
    let evaluation = Evaluation::of(inputs);
    tracing::info!(
        source = %source,
        score = evaluation.result.score,
        tier = evaluation.result.tier.as_str(),
        "evaluated snapshot"
    );

    let drivers = if args.ranked {
        evaluation.factors.ranked_drivers()
    } else {
        evaluation.factors.drivers()
    };

    match settings.format {
        OutputFormat::Table => {
            print_header("Stress Evaluation");
            print_table(&summary_rows(&source, &evaluation, settings))?;
            if !settings.quiet {
                print_header("Drivers");
                print_table(&driver_rows(&inputs, &drivers, settings))?;
            }
        }
        OutputFormat::Json => {
            print_json(&EvaluateOutput {
                source,
                evaluation: &evaluation,
                drivers,
            })?;
        }
        OutputFormat::Csv => {
            let f = &evaluation.factors;
            print_csv(&[EvaluateRecord {
                source,
                score: evaluation.result.score,
                tier: evaluation.result.tier.as_str(),
                duration_loss_pct: evaluation.result.duration_loss_pct,
                rate_shock: f.rate_shock,
                uninsured: f.uninsured,
                duration: f.duration,
                losses: f.losses,
                withdrawal: f.withdrawal,
                concentration: f.concentration,
            }])?;
        }
        OutputFormat::Minimal => {
            println!(
                "{} {}",
                settings.num(evaluation.result.score),
                evaluation.result.tier.as_str()
            );
        }
    }

    Ok(())
}

fn summary_rows(source: &str, evaluation: &Evaluation, settings: &Settings) -> Vec<KeyValue> {
    let result = &evaluation.result;
    vec![
        KeyValue::new("Scenario", source),
        KeyValue::new("Stress Score", format!("{} / 100", settings.num(result.score))),
        KeyValue::new("Risk Tier", tier_label(result.tier).to_string()),
        KeyValue::new("Duration Loss", format!("{}%", settings.num(result.duration_loss_pct))),
        KeyValue::new("Interpretation", result.interpretation.clone()),
    ]
}

fn driver_rows(inputs: &StressInputs, drivers: &[Driver], settings: &Settings) -> Vec<DriverRow> {
    drivers
        .iter()
        .map(|d| DriverRow {
            factor: d.factor.label().to_string(),
            raw: format!("{}{}", settings.num(inputs.get(d.factor)), d.factor.unit()),
            weight: d.weight,
            normalized: format!("{:.3}", d.normalized),
            points: settings.num(d.contribution),
            bar: bar(d.normalized, BAR_WIDTH),
        })
        .collect()
}
