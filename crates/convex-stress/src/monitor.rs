//! The evaluation cycle.
//!
//! On every input change the host calls [`StressMonitor::recompute`] with a
//! fresh snapshot. The monitor evaluates the model, appends the score to its
//! history, and hands back everything a renderer needs.

use serde::{Deserialize, Serialize};

use crate::error::StressOutcome;
use crate::history::{HistoryBuffer, HistorySample};
use crate::inputs::StressInputs;
use crate::model::{evaluate, normalize, NormalizedFactors, StressResult};

/// Full output of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// The snapshot that was evaluated.
    pub inputs: StressInputs,
    /// Normalized factors, one bar each in the driver chart.
    pub factors: NormalizedFactors,
    /// Score, tier, interpretation and duration loss.
    pub result: StressResult,
}

impl Evaluation {
    /// Evaluates a snapshot without touching any history.
    pub fn of(inputs: StressInputs) -> Self {
        Self {
            inputs,
            factors: normalize(&inputs),
            result: evaluate(&inputs),
        }
    }
}

/// Owns the history and runs evaluation cycles.
#[derive(Debug, Clone, Default)]
pub struct StressMonitor {
    history: HistoryBuffer,
    cycles: u64,
}

impl StressMonitor {
    /// Creates a monitor with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one cycle: evaluate, then append the score under `label`.
    pub fn recompute(&mut self, inputs: StressInputs, label: impl Into<String>) -> Evaluation {
        let evaluation = Evaluation::of(inputs);
        self.history.append(evaluation.result.score, label);
        self.cycles += 1;
        log::debug!(
            "cycle {}: score={:.2} tier={} duration_loss={:.2}",
            self.cycles,
            evaluation.result.score,
            evaluation.result.tier.as_str(),
            evaluation.result.duration_loss_pct
        );
        evaluation
    }

    /// Like [`recompute`](Self::recompute), but rejects a snapshot with
    /// non-finite fields. A rejected cycle leaves the history untouched.
    pub fn try_recompute(
        &mut self,
        inputs: StressInputs,
        label: impl Into<String>,
    ) -> StressOutcome<Evaluation> {
        if let Err(e) = inputs.validate() {
            log::warn!("rejected evaluation cycle: {}", e);
            return Err(e);
        }
        Ok(self.recompute(inputs, label))
    }

    /// The rolling history.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Snapshot of the history, oldest first.
    pub fn current(&self) -> Vec<HistorySample> {
        self.history.current()
    }

    /// Number of completed cycles, including those whose samples were evicted.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
