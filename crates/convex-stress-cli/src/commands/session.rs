//! Session command implementation.
//!
//! Replays a stream of input changes, one per line, through a
//! [`StressMonitor`]. Each accepted change is one evaluation cycle and adds
//! one point to the rolling history.
//!
//! ```text
//! # comments and blank lines are ignored
//! preset svb
//! uninsured=95 withdrawal=100
//! history
//! quit
//! ```

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use convex_stress::{
    Evaluation, Factor, HistorySample, Preset, RiskTier, StressInputs, StressMonitor,
};

use crate::cli::OutputFormat;
use crate::commands::parse_number;
use crate::error::{CliError, CliResult};
use crate::output::{
    print_csv, print_header, print_json, print_table, print_warning, sparkline, tier_label,
};
use crate::settings::Settings;

/// Arguments for the session command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Script of input changes (reads stdin when omitted)
    pub script: Option<PathBuf>,

    /// Preset loaded before the first line (defaults to default_preset)
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// How history points are labelled
    #[arg(long, value_enum, default_value = "clock")]
    pub labels: LabelMode,

    /// Stop at the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// History label source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelMode {
    /// Wall-clock time formatted with label_format
    Clock,
    /// Cycle number (#1, #2, ...)
    Sequence,
}

/// Produces a display label for each cycle.
#[derive(Debug)]
struct LabelSource {
    mode: LabelMode,
    pattern: String,
    next: u64,
}

impl LabelSource {
    fn new(mode: LabelMode, pattern: &str) -> Self {
        Self {
            mode,
            pattern: pattern.to_string(),
            next: 1,
        }
    }

    fn next_label(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        match self.mode {
            LabelMode::Clock => chrono::Local::now().format(&self.pattern).to_string(),
            LabelMode::Sequence => format!("#{}", n),
        }
    }
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Replace the whole snapshot with a preset.
    ApplyPreset(Preset),
    /// Set one or more fields.
    Set(Vec<(Factor, f64)>),
    /// Print the history so far.
    ShowHistory,
    /// Stop reading.
    Quit,
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str, number: usize) -> CliResult<Option<SessionEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let err = |message: String| CliError::Session {
        line: number,
        message,
    };

    let mut tokens = line.split_whitespace();
    let head = tokens.next().unwrap_or_default();
    match head.to_lowercase().as_str() {
        "preset" => {
            let name = tokens
                .next()
                .ok_or_else(|| err("preset needs a name".to_string()))?;
            if tokens.next().is_some() {
                return Err(err("preset takes exactly one name".to_string()));
            }
            let preset = name
                .parse()
                .map_err(|e: convex_stress::StressError| err(e.to_string()))?;
            Ok(Some(SessionEvent::ApplyPreset(preset)))
        }
        "history" => Ok(Some(SessionEvent::ShowHistory)),
        "quit" | "exit" => Ok(Some(SessionEvent::Quit)),
        _ => {
            let mut changes = Vec::new();
            for token in line.split_whitespace() {
                let (key, value) = token
                    .split_once('=')
                    .ok_or_else(|| err(format!("expected factor=value, got '{}'", token)))?;
                let factor: Factor = key
                    .parse()
                    .map_err(|e: convex_stress::StressError| err(e.to_string()))?;
                let value = parse_number(key, value).map_err(|e| err(e.to_string()))?;
                changes.push((factor, value));
            }
            Ok(Some(SessionEvent::Set(changes)))
        }
    }
}

/// Decodes one raw script line. Invalid UTF-8 rejects only that line.
pub fn decode_line(bytes: &[u8], number: usize) -> CliResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| CliError::Session {
        line: number,
        message: format!("not valid UTF-8 (byte {})", e.utf8_error().valid_up_to()),
    })
}

/// Applies an event to the live snapshot. Returns the new snapshot for
/// events that trigger a cycle.
fn apply(event: &SessionEvent, live: &StressInputs) -> CliResult<Option<StressInputs>> {
    match event {
        SessionEvent::ApplyPreset(preset) => Ok(Some(preset.inputs())),
        SessionEvent::Set(changes) => {
            let mut next = *live;
            for (factor, value) in changes {
                next.set(*factor, *value);
            }
            next.validate()?;
            Ok(Some(next))
        }
        SessionEvent::ShowHistory | SessionEvent::Quit => Ok(None),
    }
}

#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary {
    cycles: u64,
    rejected: usize,
    last: Option<Evaluation>,
    history: Vec<HistorySample>,
}

/// Execute the session command.
pub fn execute(args: SessionArgs, settings: &Settings) -> Result<()> {
    let mut reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut monitor = StressMonitor::new();
    let mut labels = LabelSource::new(args.labels, &settings.label_format);
    let mut live = args.preset.unwrap_or(settings.default_preset).inputs();
    let mut rejected = 0usize;

    // Initial load is the first cycle.
    let mut last = Some(cycle(&mut monitor, &mut labels, live, settings));

    let mut buf = Vec::new();
    let mut number = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;
        let parsed = decode_line(&buf, number).and_then(|line| parse_line(&line, number));
        let event = match parsed {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                if args.strict {
                    return Err(e.into());
                }
                rejected += 1;
                print_warning(&e.to_string());
                continue;
            }
        };

        match apply(&event, &live) {
            Ok(Some(next)) => {
                live = next;
                last = Some(cycle(&mut monitor, &mut labels, live, settings));
            }
            Ok(None) => match event {
                SessionEvent::ShowHistory if settings.format == OutputFormat::Table => {
                    print_history(monitor.history().iter(), settings)?;
                }
                SessionEvent::Quit => break,
                _ => {}
            },
            Err(e) => {
                let e = CliError::Session {
                    line: number,
                    message: e.to_string(),
                };
                if args.strict {
                    return Err(e.into());
                }
                rejected += 1;
                print_warning(&e.to_string());
            }
        }
    }

    tracing::info!(cycles = monitor.cycles(), rejected, "session finished");

    match settings.format {
        OutputFormat::Table => {
            print_header("History");
            print_history(monitor.history().iter(), settings)?;
            println!("{}", sparkline(&monitor.history().scores()));
            if rejected > 0 {
                print_warning(&format!("{} line(s) rejected", rejected));
            }
        }
        OutputFormat::Json => {
            print_json(&SessionSummary {
                cycles: monitor.cycles(),
                rejected,
                last,
                history: monitor.current(),
            })?;
        }
        OutputFormat::Csv => {
            print_csv(&monitor.current())?;
        }
        OutputFormat::Minimal => {
            if let Some(sample) = monitor.history().latest() {
                println!("{}", settings.num(sample.score));
            }
        }
    }

    Ok(())
}

/// Runs one evaluation cycle and reports it in table mode.
fn cycle(
    monitor: &mut StressMonitor,
    labels: &mut LabelSource,
    inputs: StressInputs,
    settings: &Settings,
) -> Evaluation {
    let label = labels.next_label();
    let evaluation = monitor.recompute(inputs, label.clone());
    if settings.format == OutputFormat::Table && !settings.quiet {
        println!(
            "{:>10}  score {:>6}  {}  duration loss {}%",
            label,
            settings.num(evaluation.result.score),
            tier_label(evaluation.result.tier),
            settings.num(evaluation.result.duration_loss_pct)
        );
    }
    evaluation
}

fn print_history<'a>(
    samples: impl Iterator<Item = &'a HistorySample>,
    settings: &Settings,
) -> Result<()> {
    let rows: Vec<HistoryRow> = samples
        .map(|s| HistoryRow {
            label: s.label.clone(),
            score: settings.num(s.score),
            tier: tier_label(RiskTier::classify(s.score)).to_string(),
        })
        .collect();
    print_table(&rows)
}
