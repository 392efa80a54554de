//! Presets command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use convex_stress::{evaluate, Preset, RiskTier, StressInputs};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output, tier_label};
use crate::settings::Settings;

/// Arguments for the presets command.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Also show the raw inputs of each preset
    #[arg(long)]
    pub inputs: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct PresetRow {
    #[tabled(rename = "Preset")]
    name: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Duration Loss")]
    duration_loss: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

#[derive(Debug, Serialize, Tabled)]
struct PresetInputsRow {
    #[tabled(rename = "Preset")]
    name: &'static str,
    #[tabled(rename = "Rate Shock")]
    rate_shock_pct: f64,
    #[tabled(rename = "Uninsured")]
    uninsured_pct: f64,
    #[tabled(rename = "Duration")]
    duration_years: f64,
    #[tabled(rename = "Losses")]
    unrealized_loss_pct_cap: f64,
    #[tabled(rename = "Withdrawal")]
    withdrawal_speed: f64,
    #[tabled(rename = "Concentration")]
    concentration: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetDocument {
    name: &'static str,
    description: &'static str,
    inputs: StressInputs,
    score: f64,
    tier: RiskTier,
    duration_loss_pct: f64,
}

/// Execute the presets command.
pub fn execute(args: PresetsArgs, settings: &Settings) -> Result<()> {
    match settings.format {
        OutputFormat::Json => {
            let docs: Vec<PresetDocument> = Preset::ALL
                .iter()
                .map(|p| {
                    let result = evaluate(&p.inputs());
                    PresetDocument {
                        name: p.name(),
                        description: p.description(),
                        inputs: p.inputs(),
                        score: result.score,
                        tier: result.tier,
                        duration_loss_pct: result.duration_loss_pct,
                    }
                })
                .collect();
            print_json(&docs)?;
        }
        OutputFormat::Minimal => {
            for preset in Preset::ALL {
                println!("{}", preset.name());
            }
        }
        format => {
            let rows: Vec<PresetRow> = Preset::ALL
                .iter()
                .map(|p| {
                    let result = evaluate(&p.inputs());
                    let tier = if format == OutputFormat::Table {
                        tier_label(result.tier).to_string()
                    } else {
                        result.tier.as_str().to_string()
                    };
                    PresetRow {
                        name: p.name(),
                        score: settings.num(result.score),
                        tier,
                        duration_loss: settings.num(result.duration_loss_pct),
                        description: p.description(),
                    }
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Scenario Presets");
            }
            print_output(&rows, format)?;

            if args.inputs {
                let rows: Vec<PresetInputsRow> = Preset::ALL
                    .iter()
                    .map(|p| {
                        let i = p.inputs();
                        PresetInputsRow {
                            name: p.name(),
                            rate_shock_pct: i.rate_shock_pct,
                            uninsured_pct: i.uninsured_pct,
                            duration_years: i.duration_years,
                            unrealized_loss_pct_cap: i.unrealized_loss_pct_cap,
                            withdrawal_speed: i.withdrawal_speed,
                            concentration: i.concentration,
                        }
                    })
                    .collect();
                if format == OutputFormat::Table {
                    print_header("Preset Inputs");
                }
                print_output(&rows, format)?;
            }
        }
    }

    Ok(())
}
