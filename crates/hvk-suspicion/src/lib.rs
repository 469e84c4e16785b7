//! hvk-suspicion
//!
//! Combines per-source signal readings into one suspicion score per
//! evaluation tick, and retains a bounded time-window of past samples so the
//! lockdown controller can apply hysteresis.
//!
//! Side-effect free by contract: this crate never touches the page, the
//! console, or the network. Eviction is by sample age, not by count — the
//! controller's debounce/cooldown semantics are wall-clock windows, so the
//! retained history must be too.

use hvk_signals::{Signal, SourceId};
use std::collections::VecDeque;

/// The aggregator's combined reading at one evaluation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuspicionSample {
    /// Combined score in [0, 1].
    pub score: f64,
    /// Host-monotonic milliseconds at the tick.
    pub at_ms: u64,
}

/// How per-source values combine into one score.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregationMode {
    /// `score = max(values)` — any single strong signal is sufficient.
    /// The default.
    Max,
    /// Softer aggregation: `score = Σ weight_i · value_i`, clamped to [0, 1].
    /// Sources without a listed weight contribute nothing.
    WeightedSum(Vec<(SourceId, f64)>),
}

pub struct Aggregator {
    mode: AggregationMode,
    window_ms: u64,
    samples: VecDeque<SuspicionSample>,
}

impl Aggregator {
    pub fn new(mode: AggregationMode, window_ms: u64) -> Self {
        Self {
            mode,
            window_ms,
            samples: VecDeque::new(),
        }
    }

    /// Combine the current readings into one sample and retain it.
    ///
    /// `readings` are last-known values: a source that has not reported this
    /// tick contributes its previous value, or 0 if it never reported.
    /// Values are clamped into [0, 1] defensively before combining.
    pub fn aggregate(&mut self, readings: &[Signal], now_ms: u64) -> SuspicionSample {
        let score = match &self.mode {
            AggregationMode::Max => readings
                .iter()
                .map(|s| s.value.clamp(0.0, 1.0))
                .fold(0.0, f64::max),
            AggregationMode::WeightedSum(weights) => readings
                .iter()
                .map(|s| {
                    let w = weights
                        .iter()
                        .find(|(id, _)| *id == s.source)
                        .map(|(_, w)| *w)
                        .unwrap_or(0.0);
                    w * s.value.clamp(0.0, 1.0)
                })
                .sum::<f64>()
                .clamp(0.0, 1.0),
        };

        let sample = SuspicionSample { score, at_ms: now_ms };
        self.samples.push_back(sample);
        self.evict(now_ms);
        sample
    }

    /// Drop samples older than the retention window.
    fn evict(&mut self, now_ms: u64) {
        while let Some(front) = self.samples.front() {
            if now_ms.saturating_sub(front.at_ms) > self.window_ms {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn latest(&self) -> Option<SuspicionSample> {
        self.samples.back().copied()
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &SuspicionSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
