//! Bounded rolling history of stress scores.
//!
//! Drives the time-series view: at most [`HISTORY_CAPACITY`] samples,
//! oldest first, with strict FIFO eviction on overflow. There is no clear
//! and no removal other than eviction.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Maximum number of samples retained.
pub const HISTORY_CAPACITY: usize = 30;

/// One point of the time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    /// Caller-supplied display label, typically a timestamp.
    pub label: String,
    /// Stress score at that point.
    pub score: f64,
}

impl HistorySample {
    /// Creates a sample.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Fixed-capacity FIFO of [`HistorySample`]s.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
}

impl HistoryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Appends a score with its label.
    ///
    /// Labels are not validated or deduplicated.
    pub fn append(&mut self, score: f64, label: impl Into<String>) {
        self.push(HistorySample::new(label, score));
    }

    /// Appends a sample, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push_back(sample);
        if self.samples.len() > HISTORY_CAPACITY {
            if let Some(evicted) = self.samples.pop_front() {
                log::trace!("history full, evicted sample {:?}", evicted.label);
            }
        }
    }

    /// Snapshot of the contents, oldest first.
    pub fn current(&self) -> Vec<HistorySample> {
        self.samples.iter().cloned().collect()
    }

    /// Iterates over the samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    /// Scores only, oldest first.
    pub fn scores(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.score).collect()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true when no sample has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns true once the buffer holds [`HISTORY_CAPACITY`] samples.
    pub fn is_full(&self) -> bool {
        self.samples.len() == HISTORY_CAPACITY
    }
}

/// A [`HistoryBuffer`] behind a single mutex, for hosts that evaluate on
/// more than one thread.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<Mutex<HistoryBuffer>>,
}

impl SharedHistory {
    /// Creates an empty shared buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends under the lock.
    pub fn append(&self, score: f64, label: impl Into<String>) {
        self.inner.lock().append(score, label);
    }

    /// Snapshot under the lock, oldest first.
    pub fn current(&self) -> Vec<HistorySample> {
        self.inner.lock().current()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true when empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
