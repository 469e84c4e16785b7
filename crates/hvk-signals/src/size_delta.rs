use crate::{PageEnv, Signal, SignalSource, SourceId};

/// Viewport-vs-window geometry probe.
///
/// A docked inspector pane steals space from the viewport, so `outer − inner`
/// jumps past the threshold on whichever axis the pane docked. The merged
/// page scripts disagreed on the threshold (30 / 50 / 160 px); it is a policy
/// knob here, not a constant.
///
/// Known false positive: browser zoom and some window-manager decorations
/// also inflate the delta. That is inherent to the heuristic.
#[derive(Clone, Debug)]
pub struct SizeDeltaSource {
    threshold_px: u32,
    cadence_ms: u64,
    next_due_ms: u64,
    last_value: f64,
}

impl SizeDeltaSource {
    pub fn new(threshold_px: u32, cadence_ms: u64) -> Self {
        Self {
            threshold_px,
            cadence_ms,
            next_due_ms: 0,
            last_value: 0.0,
        }
    }
}

impl SignalSource for SizeDeltaSource {
    fn id(&self) -> SourceId {
        SourceId::SizeDelta
    }

    fn due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    fn sample(&mut self, env: &mut dyn PageEnv, now_ms: u64) -> Signal {
        self.next_due_ms = now_ms.saturating_add(self.cadence_ms);

        let firing = match env.window_metrics() {
            Some(m) => {
                m.height_delta() > self.threshold_px || m.width_delta() > self.threshold_px
            }
            // Capability missing: clear signal, never an error.
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
