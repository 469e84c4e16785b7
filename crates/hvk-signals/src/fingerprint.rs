use crate::{PageEnv, Signal, SignalSource, SourceId};

/// Known-tool fingerprint probe.
///
/// Inspects the privileged extension-manifest API (where it exists) for a
/// substring match against a configured deny-list of capture-tool names.
/// The deny-list is policy, not code: adding a tool name must never require
/// touching detection logic.
///
/// Fails closed on the signal: when the API is unavailable (the normal case
/// in most browsers) the probe emits 0 and never throws.
#[derive(Clone, Debug)]
pub struct ToolFingerprintSource {
    /// Lowercased at construction; matching is case-insensitive substring.
    deny_list: Vec<String>,
    cadence_ms: u64,
    next_due_ms: u64,
    last_value: f64,
}

impl ToolFingerprintSource {
    pub fn new(deny_list: impl IntoIterator<Item = String>, cadence_ms: u64) -> Self {
        Self {
            deny_list: deny_list
                .into_iter()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            cadence_ms,
            next_due_ms: 0,
            last_value: 0.0,
        }
    }

    pub fn deny_list(&self) -> &[String] {
        &self.deny_list
    }
}

impl SignalSource for ToolFingerprintSource {
    fn id(&self) -> SourceId {
        SourceId::ToolFingerprint
    }

    fn due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    fn sample(&mut self, env: &mut dyn PageEnv, now_ms: u64) -> Signal {
        self.next_due_ms = now_ms.saturating_add(self.cadence_ms);

        let firing = match env.extension_manifest_name() {
            Some(name) => {
                let name = name.to_lowercase();
                self.deny_list.iter().any(|tool| name.contains(tool.as_str()))
            }
            None => false,
        };

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
