//! Convex Stress CLI - bank balance-sheet stress calculator.
//!
//! # Usage
//!
//! ```bash
//! # Score a preset
//! convex-stress evaluate --preset svb
//!
//! # Adjust a preset
//! convex-stress evaluate --preset stable --uninsured 90 --withdrawal 95
//!
//! # Replay a script of input changes and chart the history
//! convex-stress session changes.txt --labels sequence
//!
//! # Walk one factor across its range
//! convex-stress sweep withdrawal --preset svb --steps 20
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use settings::{Config, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match (Config::load(), &cli.command) {
        (Ok(config), _) => config,
        // An unparseable file must not lock out `config reset`.
        (Err(e), Commands::Config(_)) => {
            tracing::warn!(error = %e, "ignoring unreadable configuration");
            Config::default()
        }
        (Err(e), _) => return Err(e.into()),
    };
    let settings = match (Settings::resolve(&cli, &config), &cli.command) {
        (Ok(settings), _) => settings,
        // Let `config` run with defaults so a bad stored value can be fixed.
        (Err(e), Commands::Config(_)) => {
            tracing::warn!(error = %e, "ignoring invalid configuration");
            Settings {
                format: cli.format.unwrap_or_default(),
                quiet: cli.quiet,
                ..Settings::default()
            }
        }
        (Err(e), _) => return Err(e.into()),
    };

    if !settings.use_colors || cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Evaluate(args) => commands::evaluate::execute(args, &settings)?,
        Commands::Presets(args) => commands::presets::execute(args, &settings)?,
        Commands::Session(args) => commands::session::execute(args, &settings)?,
        Commands::Sweep(args) => commands::sweep::execute(args, &settings)?,
        Commands::Config(args) => commands::config::execute(args, config, &settings)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info,convex_stress=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
