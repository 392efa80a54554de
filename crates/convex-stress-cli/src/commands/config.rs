//! Config command implementation.
//!
//! Reads and edits the stored configuration file. Every key is reported with
//! its effective value and whether that value is stored or a built-in default.

use std::fmt;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_info, print_json, print_output, print_success};
use crate::settings::{config_path, Config, ConfigKey, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show every key with its effective value
    Show,

    /// Print one key's effective value
    Get {
        /// Configuration key (aliases such as `precision` are accepted)
        key: String,
    },

    /// Validate and store a value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// List the available keys with descriptions and defaults
    List,

    /// Drop stored values so the defaults apply again
    Reset(ResetArgs),

    /// Show the configuration file location
    Path,
}

/// Arguments for the reset subcommand.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ResetArgs {
    /// Reset every key
    #[arg(long)]
    pub all: bool,

    /// Key to reset
    pub key: Option<String>,
}

/// Where an effective value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Source {
    Stored,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Stored => "stored",
            Source::Default => "default",
        })
    }
}

/// One key's effective value.
#[derive(Debug, Serialize, Tabled)]
struct ConfigEntry {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: Source,
}

impl ConfigEntry {
    fn of(config: &Config, key: ConfigKey) -> Self {
        let (value, source) = match config.get(key) {
            Some(stored) => (stored, Source::Stored),
            None => (key.default_value(), Source::Default),
        };
        Self {
            key: key.as_str(),
            value: value.to_string(),
            source,
        }
    }
}

/// Catalog row for `config list`.
#[derive(Debug, Serialize, Tabled)]
struct KeyInfo {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Default")]
    default: &'static str,
}

impl From<ConfigKey> for KeyInfo {
    fn from(key: ConfigKey) -> Self {
        Self {
            key: key.as_str(),
            description: key.description(),
            default: key.default_value(),
        }
    }
}

fn parse_key(s: &str) -> Result<ConfigKey, CliError> {
    ConfigKey::parse(s).ok_or_else(|| CliError::UnknownConfigKey(s.to_string()))
}

/// Execute the config command.
///
/// Takes the raw config rather than resolved settings, so a stored value that
/// fails validation can still be inspected and repaired.
pub fn execute(args: ConfigArgs, config: Config, settings: &Settings) -> Result<()> {
    let format = settings.format;
    match args.command {
        ConfigCommand::Show => {
            let entries: Vec<ConfigEntry> = ConfigKey::all()
                .iter()
                .map(|key| ConfigEntry::of(&config, *key))
                .collect();
            if format == OutputFormat::Minimal {
                for entry in &entries {
                    println!("{}={}", entry.key, entry.value);
                }
                return Ok(());
            }
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&entries, format)
        }
        ConfigCommand::Get { key } => {
            let entry = ConfigEntry::of(&config, parse_key(&key)?);
            match format {
                OutputFormat::Table => {
                    println!("{}: {} ({})", entry.key, entry.value, entry.source)
                }
                OutputFormat::Json => print_json(&entry)?,
                OutputFormat::Csv => print_csv(&[entry])?,
                OutputFormat::Minimal => println!("{}", entry.value),
            }
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(config, parse_key(&key)?, value),
        ConfigCommand::List => {
            let keys: Vec<KeyInfo> = ConfigKey::all()
                .iter()
                .copied()
                .map(KeyInfo::from)
                .collect();
            if format == OutputFormat::Minimal {
                for info in &keys {
                    println!("{}", info.key);
                }
                return Ok(());
            }
            if format == OutputFormat::Table {
                print_header("Available Configuration Keys");
            }
            print_output(&keys, format)
        }
        ConfigCommand::Reset(reset_args) => reset(config, reset_args),
        ConfigCommand::Path => {
            let path = config_path()?;
            let status = if path.exists() {
                "exists"
            } else {
                "not created yet (using defaults)"
            };
            print_info(&format!("Config file: {}", path.display()));
            print_info(&format!("Status: {}", status));
            Ok(())
        }
    }
}

fn set(mut config: Config, key: ConfigKey, value: String) -> Result<()> {
    key.validate(&value)?;
    config.set(key, value.clone());
    config.save()?;
    tracing::info!(key = key.as_str(), value = %value, "configuration updated");
    print_success(&format!("Set {} = {}", key.as_str(), value));
    Ok(())
}

fn reset(mut config: Config, args: ResetArgs) -> Result<()> {
    let message = match args.key {
        Some(name) => {
            let key = parse_key(&name)?;
            config.remove(key);
            format!("Reset {} to default ({})", key.as_str(), key.default_value())
        }
        None => {
            config.clear();
            "Reset all configuration to defaults".to_string()
        }
    };
    config.save()?;
    tracing::info!(all = args.all, "configuration reset");
    print_success(&message);
    Ok(())
}
