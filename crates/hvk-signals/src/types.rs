/// Stable identity of a heuristic probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    SizeDelta,
    TimingAnomaly,
    ToolFingerprint,
    MutationAnomaly,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::SizeDelta => "size_delta",
            SourceId::TimingAnomaly => "timing_anomaly",
            SourceId::ToolFingerprint => "tool_fingerprint",
            SourceId::MutationAnomaly => "mutation_anomaly",
        }
    }

    /// Inverse of [`SourceId::as_str`]; used when mapping policy weight keys.
    pub fn from_name(name: &str) -> Option<SourceId> {
        match name {
            "size_delta" => Some(SourceId::SizeDelta),
            "timing_anomaly" => Some(SourceId::TimingAnomaly),
            "tool_fingerprint" => Some(SourceId::ToolFingerprint),
            "mutation_anomaly" => Some(SourceId::MutationAnomaly),
            _ => None,
        }
    }
}

/// One heuristic reading at a point in time. Immutable once emitted; consumed
/// by the aggregator and discarded (no persistence).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signal {
    pub source: SourceId,
    /// Confidence in [0, 1]. Boolean probes emit exactly 0.0 or 1.0.
    pub value: f64,
    /// Host-monotonic milliseconds at emission.
    pub at_ms: u64,
}

impl Signal {
    /// Nothing suspicious observed (also the probe-failure value).
    pub fn clear(source: SourceId, at_ms: u64) -> Self {
        Signal {
            source,
            value: 0.0,
            at_ms,
        }
    }

    pub fn firing(source: SourceId, at_ms: u64) -> Self {
        Signal {
            source,
            value: 1.0,
            at_ms,
        }
    }
}

/// Window geometry snapshot as the host reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowMetrics {
    pub inner_width: u32,
    pub inner_height: u32,
    pub outer_width: u32,
    pub outer_height: u32,
}

impl WindowMetrics {
    /// Chrome height: outer minus viewport. A docked inspector pane inflates
    /// this on one axis.
    pub fn height_delta(&self) -> u32 {
        self.outer_height.saturating_sub(self.inner_height)
    }

    pub fn width_delta(&self) -> u32 {
        self.outer_width.saturating_sub(self.inner_width)
    }
}

/// A DOM mutation as reported by the host's observer hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationRecord {
    /// An attribute changed on the observed root (`documentElement`/`body`).
    Attribute { name: String },
    /// Child nodes were added or removed under the observed root.
    Subtree { added: usize, removed: usize },
}
