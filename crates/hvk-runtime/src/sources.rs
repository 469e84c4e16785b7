use hvk_config::{SourcesPolicy, TimingProbe};
use hvk_signals::{
    MutationAnomalySource, MutationRecord, PageEnv, Signal, SignalSource, SizeDeltaSource,
    TimingAnomalySource, TimingProbeKind, ToolFingerprintSource,
};

/// The concrete probes built from policy. A disabled source is simply never
/// constructed; no null-object probes, no trait-object juggling.
pub struct SourceSet {
    size: Option<SizeDeltaSource>,
    timing: Option<TimingAnomalySource>,
    fingerprint: Option<ToolFingerprintSource>,
    mutation: Option<MutationAnomalySource>,
}

impl SourceSet {
    pub fn from_policy(policy: &SourcesPolicy) -> Self {
        let size = policy
            .size_delta
            .enabled
            .then(|| SizeDeltaSource::new(policy.size_delta.threshold_px, policy.size_delta.cadence_ms));

        let timing = policy.timing.enabled.then(|| {
            let kind = match policy.timing.probe {
                TimingProbe::DebuggerYield => TimingProbeKind::DebuggerYield,
                TimingProbe::ConsoleWrite => TimingProbeKind::ConsoleWrite,
            };
            TimingAnomalySource::new(kind, policy.timing.threshold_ms, policy.timing.cadence_ms)
        });

        let fingerprint = policy.tool_fingerprint.enabled.then(|| {
            ToolFingerprintSource::new(
                policy.tool_fingerprint.deny_list.iter().cloned(),
                policy.tool_fingerprint.cadence_ms,
            )
        });

        let mutation = policy.mutation.enabled.then(|| {
            MutationAnomalySource::new(
                policy.mutation.suspicious_attributes.iter().cloned(),
                policy.mutation.flag_subtree,
                policy.mutation.cadence_ms,
            )
        });

        Self {
            size,
            timing,
            fingerprint,
            mutation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.timing.is_none()
            && self.fingerprint.is_none()
            && self.mutation.is_none()
    }

    /// Sample every source whose own cadence has elapsed.
    pub fn sample_due(&mut self, env: &mut dyn PageEnv, now_ms: u64) {
        if let Some(s) = self.size.as_mut().filter(|s| s.due(now_ms)) {
            s.sample(env, now_ms);
        }
        if let Some(s) = self.timing.as_mut().filter(|s| s.due(now_ms)) {
            s.sample(env, now_ms);
        }
        if let Some(s) = self.fingerprint.as_mut().filter(|s| s.due(now_ms)) {
            s.sample(env, now_ms);
        }
        if let Some(s) = self.mutation.as_mut().filter(|s| s.due(now_ms)) {
            s.sample(env, now_ms);
        }
    }

    /// Last-known value of each enabled source, as signals stamped `now_ms`.
    /// This is what the aggregator combines on an evaluation tick; sources
    /// not due this tick contribute their previous reading.
    pub fn current(&self, now_ms: u64) -> Vec<Signal> {
        let mut out = Vec::with_capacity(4);
        if let Some(s) = &self.size {
            out.push(Signal {
                source: s.id(),
                value: s.last_value(),
                at_ms: now_ms,
            });
        }
        if let Some(s) = &self.timing {
            out.push(Signal {
                source: s.id(),
                value: s.last_value(),
                at_ms: now_ms,
            });
        }
        if let Some(s) = &self.fingerprint {
            out.push(Signal {
                source: s.id(),
                value: s.last_value(),
                at_ms: now_ms,
            });
        }
        if let Some(s) = &self.mutation {
            out.push(Signal {
                source: s.id(),
                value: s.last_value(),
                at_ms: now_ms,
            });
        }
        out
    }

    /// Out-of-cadence geometry sample, driven by the host's `resize` event.
    pub fn force_size_sample(&mut self, env: &mut dyn PageEnv, now_ms: u64) {
        if let Some(s) = self.size.as_mut() {
            s.sample(env, now_ms);
        }
    }

    /// Forward one mutation record from the host's observer hook.
    pub fn observe_mutation(&mut self, record: &MutationRecord) {
        if let Some(s) = self.mutation.as_mut() {
            s.observe(record);
        }
    }
}
