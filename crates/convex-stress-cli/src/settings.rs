//! Persistent CLI settings.
//!
//! Settings live in a small JSON file under the user's config directory.
//! Set `CONVEX_STRESS_CONFIG` to point at a different file.

use std::collections::HashMap;
use std::path::PathBuf;

use convex_stress::Preset;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CONVEX_STRESS_CONFIG";

/// Configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Preset used when no inputs are given
    DefaultPreset,
    /// Decimal places for scores and percentages
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
    /// strftime pattern for history labels
    LabelFormat,
}

impl ConfigKey {
    /// Parses a key name or its short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_preset" | "preset" => Some(Self::DefaultPreset),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            "label_format" | "labels" => Some(Self::LabelFormat),
            _ => None,
        }
    }

    /// Canonical key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultPreset => "default_preset",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
            Self::LabelFormat => "label_format",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultPreset => {
                "Preset used when no inputs are given (svb, stable, rateShock, run)"
            }
            Self::DecimalPrecision => "Number of decimal places for output (0-6)",
            Self::UseColors => "Enable colored output (true, false)",
            Self::LabelFormat => "strftime pattern for session history labels",
        }
    }

    /// Value used when the key is unset.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DefaultPreset => "svb",
            Self::DecimalPrecision => "2",
            Self::UseColors => "true",
            Self::LabelFormat => "%H:%M:%S",
        }
    }

    /// All keys.
    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultPreset,
            Self::DecimalPrecision,
            Self::UseColors,
            Self::LabelFormat,
        ]
    }

    /// Checks a value before it is stored.
    pub fn validate(&self, value: &str) -> CliResult<()> {
        let invalid = |reason: &str| CliError::InvalidConfigValue {
            key: self.as_str(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        match self {
            Self::DefaultFormat => {
                if OutputFormat::from_name(value).is_none() {
                    return Err(invalid("Use table, json, csv, or minimal."));
                }
            }
            Self::DefaultPreset => {
                if value.parse::<Preset>().is_err() {
                    return Err(invalid("Use svb, stable, rateShock, or run."));
                }
            }
            Self::DecimalPrecision => match value.parse::<usize>() {
                Ok(p) if p <= 6 => {}
                _ => return Err(invalid("Must be a number between 0 and 6.")),
            },
            Self::UseColors => {
                if parse_bool(value).is_none() {
                    return Err(invalid("Use true or false."));
                }
            }
            Self::LabelFormat => {
                if value.trim().is_empty() || !is_valid_strftime(value) {
                    return Err(invalid("Must be a non-empty strftime pattern, e.g. %H:%M:%S."));
                }
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn is_valid_strftime(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

/// Raw key/value store backing the config file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Config {
    /// Loads the config file, or an empty config if it does not exist.
    pub fn load() -> CliResult<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes the config file, creating its directory if needed.
    pub fn save(&self) -> CliResult<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Stored value, if any.
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    /// Stored value or the key's default.
    pub fn get_or_default(&self, key: ConfigKey) -> &str {
        self.get(key).unwrap_or(key.default_value())
    }

    /// Stores a value.
    pub fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    /// Removes a stored value.
    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Config file path.
pub fn config_path() -> CliResult<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
    Ok(home.join("convex-stress").join("config.json"))
}

/// Effective settings: command-line flags over config over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Decimal places.
    pub precision: usize,
    /// Colored output.
    pub use_colors: bool,
    /// Preset used when no inputs are given.
    pub default_preset: Preset,
    /// strftime pattern for history labels.
    pub label_format: String,
}

impl Settings {
    /// Resolves settings from flags and the loaded config.
    ///
    /// A stored value that no longer validates is an error rather than a
    /// silent fallback.
    pub fn resolve(cli: &Cli, config: &Config) -> CliResult<Self> {
        for key in ConfigKey::all() {
            if let Some(value) = config.get(*key) {
                key.validate(value)?;
            }
        }

        let format = match cli.format {
            Some(format) => format,
            None => OutputFormat::from_name(config.get_or_default(ConfigKey::DefaultFormat))
                .unwrap_or_default(),
        };
        let precision = config
            .get_or_default(ConfigKey::DecimalPrecision)
            .parse()
            .unwrap_or(2);
        let use_colors = !cli.no_color
            && parse_bool(config.get_or_default(ConfigKey::UseColors)).unwrap_or(true);
        let default_preset = config.get_or_default(ConfigKey::DefaultPreset).parse()?;

        Ok(Self {
            format,
            quiet: cli.quiet,
            precision,
            use_colors,
            default_preset,
            label_format: config.get_or_default(ConfigKey::LabelFormat).to_string(),
        })
    }

    /// Formats a number at the configured precision.
    pub fn num(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.precision)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            quiet: false,
            precision: 2,
            use_colors: true,
            default_preset: Preset::default(),
            label_format: ConfigKey::LabelFormat.default_value().to_string(),
        }
    }
}
