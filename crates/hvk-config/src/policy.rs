use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source names accepted as weight keys in `aggregation.weighted_sum`.
pub const KNOWN_SOURCE_NAMES: &[&str] = &[
    "size_delta",
    "timing_anomaly",
    "tool_fingerprint",
    "mutation_anomaly",
];

/// Top-level tamper policy.
///
/// Defaults reflect the dominant values in the merged page scripts; where
/// those scripts disagreed (size threshold, recovery behavior) the knob
/// defaults to the most conservative variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TamperPolicy {
    pub thresholds: Thresholds,

    /// Aggregator evaluation cadence. One knob: ~50 ms for responsiveness,
    /// ~500 ms for low overhead.
    pub tick_interval_ms: u64,

    /// Retention window for suspicion samples (hysteresis history).
    pub sample_window_ms: u64,

    pub aggregation: AggregationPolicy,
    pub recovery: RecoveryPolicyConfig,
    pub sources: SourcesPolicy,

    /// Reserved chords that force an immediate lock, bypassing scoring.
    pub key_triggers: Vec<KeyChord>,

    pub block_context_menu: bool,
    pub block_text_selection: bool,

    pub lock_screen: LockScreenPolicy,
    pub audit: AuditPolicy,
}

impl Default for TamperPolicy {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            tick_interval_ms: 50,
            sample_window_ms: 3_000,
            aggregation: AggregationPolicy::Max,
            recovery: RecoveryPolicyConfig::HoldUntilReload,
            sources: SourcesPolicy::default(),
            key_triggers: default_key_triggers(),
            block_context_menu: true,
            block_text_selection: true,
            lock_screen: LockScreenPolicy::default(),
            audit: AuditPolicy::default(),
        }
    }
}

impl TamperPolicy {
    /// Reject policies that cannot produce a coherent engine.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.low) || !(0.0..=1.0).contains(&t.high) {
            bail!("thresholds must lie in [0, 1] (low={}, high={})", t.low, t.high);
        }
        if t.low > t.high {
            bail!("low threshold {} exceeds high threshold {}", t.low, t.high);
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if self.sample_window_ms < self.tick_interval_ms {
            bail!(
                "sample_window_ms {} shorter than tick_interval_ms {}",
                self.sample_window_ms,
                self.tick_interval_ms
            );
        }

        if let AggregationPolicy::WeightedSum { weights } = &self.aggregation {
            for (name, w) in weights {
                if !KNOWN_SOURCE_NAMES.contains(&name.as_str()) {
                    bail!("unknown source '{name}' in aggregation weights");
                }
                if *w < 0.0 {
                    bail!("negative weight {w} for source '{name}'");
                }
            }
        }

        if let RecoveryPolicyConfig::ReloadAfterCalm { calm_ms } = self.recovery {
            if calm_ms == 0 {
                bail!("recovery calm_ms must be positive");
            }
        }

        self.sources.validate()?;

        for chord in &self.key_triggers {
            if chord.key.is_empty() {
                bail!("key trigger with empty key");
            }
        }

        Ok(())
    }
}

/// Score thresholds + hysteresis windows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Thresholds {
    pub high: f64,
    pub low: f64,
    pub debounce_window_ms: u64,
    pub cooldown_window_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.9,
            low: 0.5,
            debounce_window_ms: 500,
            cooldown_window_ms: 2_000,
        }
    }
}

/// How per-source values combine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum AggregationPolicy {
    Max,
    WeightedSum { weights: BTreeMap<String, f64> },
}

/// Recovery policy. Reload-to-recover is the only exit from LOCKED either
/// way; the soft variant merely automates the reload request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum RecoveryPolicyConfig {
    HoldUntilReload,
    ReloadAfterCalm { calm_ms: u64 },
}

/// Per-source knobs. `enabled: false` means the source is never constructed.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SourcesPolicy {
    pub size_delta: SizeDeltaPolicy,
    pub timing: TimingPolicy,
    pub tool_fingerprint: FingerprintPolicy,
    pub mutation: MutationPolicy,
}

impl SourcesPolicy {
    fn validate(&self) -> Result<()> {
        if self.size_delta.enabled && self.size_delta.cadence_ms == 0 {
            bail!("size_delta cadence_ms must be positive");
        }
        if self.timing.enabled && self.timing.cadence_ms == 0 {
            bail!("timing cadence_ms must be positive");
        }
        if self.tool_fingerprint.enabled && self.tool_fingerprint.cadence_ms == 0 {
            bail!("tool_fingerprint cadence_ms must be positive");
        }
        if self.mutation.enabled && self.mutation.cadence_ms == 0 {
            bail!("mutation cadence_ms must be positive");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SizeDeltaPolicy {
    pub enabled: bool,
    /// The merged scripts used 30, 50 and 160 px; 160 (fewest false
    /// positives) is the default.
    pub threshold_px: u32,
    pub cadence_ms: u64,
}

impl Default for SizeDeltaPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_px: 160,
            cadence_ms: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProbe {
    DebuggerYield,
    ConsoleWrite,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TimingPolicy {
    pub enabled: bool,
    pub probe: TimingProbe,
    pub threshold_ms: u64,
    pub cadence_ms: u64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            probe: TimingProbe::DebuggerYield,
            threshold_ms: 50,
            cadence_ms: 1_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FingerprintPolicy {
    pub enabled: bool,
    pub deny_list: Vec<String>,
    pub cadence_ms: u64,
}

impl Default for FingerprintPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            deny_list: ["wireshark", "tcpdump", "burp", "fiddler", "charles", "mitmproxy"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cadence_ms: 5_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MutationPolicy {
    pub enabled: bool,
    pub suspicious_attributes: Vec<String>,
    pub flag_subtree: bool,
    pub cadence_ms: u64,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            suspicious_attributes: vec!["style".to_string(), "class".to_string()],
            flag_subtree: false,
            cadence_ms: 250,
        }
    }
}

/// One reserved keyboard chord. `key` compares case-insensitively against
/// the host's key name (`"F12"`, `"i"`, `"Delete"` …).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for KeyChord {
    fn default() -> Self {
        Self {
            key: String::new(),
            ctrl: false,
            shift: false,
            alt: false,
        }
    }
}

impl KeyChord {
    pub fn new(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: key.to_string(),
            ctrl,
            shift,
            alt,
        }
    }

    /// Exact modifier match, case-insensitive key match.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
            && self.key.eq_ignore_ascii_case(key)
    }
}

/// The devtools chord set the original scripts intercepted.
pub fn default_key_triggers() -> Vec<KeyChord> {
    vec![
        KeyChord::new("F12", false, false, false),
        KeyChord::new("I", true, true, false),
        KeyChord::new("J", true, true, false),
        KeyChord::new("C", true, true, false),
        KeyChord::new("K", true, true, false),
        KeyChord::new("Delete", true, true, false),
        KeyChord::new("U", true, false, false),
        KeyChord::new("S", true, false, false),
    ]
}

/// Restricted-view strings (localized by deployment).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LockScreenPolicy {
    pub title: String,
    pub message: String,
    pub contact: String,
}

impl Default for LockScreenPolicy {
    fn default() -> Self {
        Self {
            title: "Access restricted".to_string(),
            message: "This page is not available while an inspection tool is active. \
                      Close it and reload the page."
                .to_string(),
            contact: "Contact support if you believe this is an error.".to_string(),
        }
    }
}

/// Episode-log settings. `path: None` disables the audit trail.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuditPolicy {
    pub path: Option<String>,
    pub hash_chain: bool,
}
