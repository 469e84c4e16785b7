//! hvk-signals
//!
//! Heuristic tamper probes ("signal sources").
//!
//! Each source answers one question about the hosting page: does the window
//! geometry look like a docked inspector pane, did a timing probe stall, does
//! the extension manifest name a known capture tool, did a suspicious DOM
//! mutation land. Sources are independent: own cadence, own last-known value,
//! no shared mutable state.
//!
//! Contract for every source:
//! - `sample` never panics and never blocks;
//! - a missing capability or internal failure produces a clear (0.0) signal,
//!   never an error surfaced to the host;
//! - all time is the host's monotonic millisecond tick, never wall clock.

mod env;
mod fingerprint;
mod mutation;
mod size_delta;
mod timing;
mod types;

pub use env::PageEnv;
pub use fingerprint::ToolFingerprintSource;
pub use mutation::MutationAnomalySource;
pub use size_delta::SizeDeltaSource;
pub use timing::{TimingAnomalySource, TimingProbeKind};
pub use types::{MutationRecord, Signal, SourceId, WindowMetrics};

/// Capability shared by all heuristic probes: produce a [`Signal`] when
/// queried. Cadence is owned by the source; the runtime asks `due` before
/// sampling and may force an extra sample on a relevant host event (e.g.
/// `resize` for the size-delta probe).
pub trait SignalSource {
    fn id(&self) -> SourceId;

    /// `true` once the source's own cadence has elapsed.
    fn due(&self, now_ms: u64) -> bool;

    /// Take one reading. Resets the cadence clock.
    fn sample(&mut self, env: &mut dyn PageEnv, now_ms: u64) -> Signal;

    /// Most recent emitted value (0.0 if the source never reported).
    /// The aggregator reads this for sources that are not due on a given
    /// evaluation tick.
    fn last_value(&self) -> f64;
}
