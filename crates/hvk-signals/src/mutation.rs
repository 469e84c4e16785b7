use crate::{MutationRecord, PageEnv, Signal, SignalSource, SourceId};

/// DOM-mutation anomaly probe.
///
/// Event-driven rather than polled: the host forwards mutation records from
/// its observer on `documentElement`/`body` via [`observe`], and the next
/// `sample` reports whether a qualifying mutation landed since the previous
/// one. Qualifying means: an attribute change whose name is on the
/// suspicious-attribute list, or (when enabled by policy) any subtree change.
///
/// [`observe`]: MutationAnomalySource::observe
#[derive(Clone, Debug)]
pub struct MutationAnomalySource {
    suspicious_attributes: Vec<String>,
    flag_subtree: bool,
    cadence_ms: u64,
    next_due_ms: u64,
    pending: bool,
    last_value: f64,
}

impl MutationAnomalySource {
    pub fn new(
        suspicious_attributes: impl IntoIterator<Item = String>,
        flag_subtree: bool,
        cadence_ms: u64,
    ) -> Self {
        Self {
            suspicious_attributes: suspicious_attributes
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            flag_subtree,
            cadence_ms,
            next_due_ms: 0,
            pending: false,
            last_value: 0.0,
        }
    }

    /// Record one mutation from the host's observer hook.
    pub fn observe(&mut self, record: &MutationRecord) {
        match record {
            MutationRecord::Attribute { name } => {
                let name = name.to_lowercase();
                if self.suspicious_attributes.iter().any(|a| *a == name) {
                    self.pending = true;
                }
            }
            MutationRecord::Subtree { added, removed } => {
                if self.flag_subtree && (*added > 0 || *removed > 0) {
                    self.pending = true;
                }
            }
        }
    }
}

impl SignalSource for MutationAnomalySource {
    fn id(&self) -> SourceId {
        SourceId::MutationAnomaly
    }

    fn due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    fn sample(&mut self, _env: &mut dyn PageEnv, now_ms: u64) -> Signal {
        self.next_due_ms = now_ms.saturating_add(self.cadence_ms);

        let firing = self.pending;
        self.pending = false;

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
