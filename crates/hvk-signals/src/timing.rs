use crate::{PageEnv, Signal, SignalSource, SourceId};

/// Which execution-time probe this source runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimingProbeKind {
    /// Wall-clock delta around a synchronous debugger-yield statement.
    /// Pauses only when an inspector is attached and breaks on it.
    DebuggerYield,
    /// Wall-clock delta around a console write. Formatting a console message
    /// is only expensive while a console is actually rendering.
    ConsoleWrite,
}

/// Execution-time anomaly probe.
///
/// Runs on its own timer, independent of the other sources, because the
/// anomaly only appears while the probe itself executes. Slow machines can
/// produce false positives; the threshold is a policy knob (the merged
/// scripts used 50 ms for the debugger probe and 1 ms for the console one).
#[derive(Clone, Debug)]
pub struct TimingAnomalySource {
    kind: TimingProbeKind,
    threshold_ms: u64,
    cadence_ms: u64,
    next_due_ms: u64,
    last_value: f64,
}

impl TimingAnomalySource {
    pub fn new(kind: TimingProbeKind, threshold_ms: u64, cadence_ms: u64) -> Self {
        Self {
            kind,
            threshold_ms,
            cadence_ms,
            next_due_ms: 0,
            last_value: 0.0,
        }
    }

    pub fn kind(&self) -> TimingProbeKind {
        self.kind
    }
}

impl SignalSource for TimingAnomalySource {
    fn id(&self) -> SourceId {
        SourceId::TimingAnomaly
    }

    fn due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    fn sample(&mut self, env: &mut dyn PageEnv, now_ms: u64) -> Signal {
        self.next_due_ms = now_ms.saturating_add(self.cadence_ms);

        let pause_ms = match self.kind {
            TimingProbeKind::DebuggerYield => env.debugger_pause_ms(),
            TimingProbeKind::ConsoleWrite => env.console_pause_ms(),
        };

        // None = capability missing = clear, per the probe contract.
        let firing = pause_ms.is_some_and(|p| p > self.threshold_ms);

        self.last_value = if firing { 1.0 } else { 0.0 };
        Signal {
            source: self.id(),
            value: self.last_value,
            at_ms: now_ms,
        }
    }

    fn last_value(&self) -> f64 {
        self.last_value
    }
}
