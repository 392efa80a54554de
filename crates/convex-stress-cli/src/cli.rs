//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, EvaluateArgs, PresetsArgs, SessionArgs, SweepArgs};

/// Convex Stress - bank balance-sheet stress calculator
#[derive(Parser)]
#[command(name = "convex-stress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured default_format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Score one input snapshot
    Evaluate(EvaluateArgs),

    /// List the built-in scenario presets
    Presets(PresetsArgs),

    /// Replay a stream of input changes and chart the rolling history
    Session(SessionArgs),

    /// Walk one factor across its range and re-score
    Sweep(SweepArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

impl OutputFormat {
    /// Parses a configured format name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}
