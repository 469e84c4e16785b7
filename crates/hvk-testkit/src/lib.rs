//! hvk-testkit
//!
//! Scripted doubles for the page traits, shared by the runtime scenario
//! tests. Each double is deliberately dumb: public fields you set up front,
//! counters you assert on afterwards.

use hvk_effects::PageHost;
use hvk_signals::{PageEnv, WindowMetrics};
use std::sync::Once;

/// Scripted read-only environment.
///
/// All capabilities default to absent so a fresh `ScriptedEnv` exercises the
/// fully-degraded path. Tests enable exactly what the scenario needs.
#[derive(Debug, Default)]
pub struct ScriptedEnv {
    pub metrics: Option<WindowMetrics>,
    /// Consumed front-to-back by the debugger-yield probe; empty means the
    /// capability is gone.
    pub debugger_pauses: Vec<u64>,
    /// Same, for the console-write probe.
    pub console_pauses: Vec<u64>,
    pub manifest_name: Option<String>,
    pub mutation_observer: bool,
}

impl ScriptedEnv {
    /// Environment with a fixed window and no anomaly on any probe.
    pub fn calm(outer_w: u32, outer_h: u32, inner_w: u32, inner_h: u32) -> Self {
        Self {
            metrics: Some(WindowMetrics {
                outer_width: outer_w,
                outer_height: outer_h,
                inner_width: inner_w,
                inner_height: inner_h,
            }),
            debugger_pauses: vec![0; 64],
            console_pauses: vec![0; 64],
            manifest_name: None,
            mutation_observer: true,
        }
    }
}

impl PageEnv for ScriptedEnv {
    fn window_metrics(&self) -> Option<WindowMetrics> {
        self.metrics
    }

    fn debugger_pause_ms(&mut self) -> Option<u64> {
        if self.debugger_pauses.is_empty() {
            None
        } else {
            Some(self.debugger_pauses.remove(0))
        }
    }

    fn console_pause_ms(&mut self) -> Option<u64> {
        if self.console_pauses.is_empty() {
            None
        } else {
            Some(self.console_pauses.remove(0))
        }
    }

    fn extension_manifest_name(&self) -> Option<String> {
        self.manifest_name.clone()
    }

    fn mutation_observer_supported(&self) -> bool {
        self.mutation_observer
    }
}

/// Host double that records every mutation in call order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Call names in the order they happened, e.g. `"replace_body"`.
    pub calls: Vec<String>,
    pub last_body: Option<String>,
    pub suppressed_events: Vec<String>,
    pub reload_requests: u32,
}

impl RecordingHost {
    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == name).count()
    }
}

impl PageHost for RecordingHost {
    fn replace_body(&mut self, html: &str) {
        self.calls.push("replace_body".into());
        self.last_body = Some(html.to_string());
    }

    fn suppress_scroll(&mut self) {
        self.calls.push("suppress_scroll".into());
    }

    fn pin_history(&mut self) {
        self.calls.push("pin_history".into());
    }

    fn install_input_suppressors(&mut self, events: &[&str]) {
        self.calls.push("install_input_suppressors".into());
        self.suppressed_events = events.iter().map(|e| e.to_string()).collect();
    }

    fn neuter_console(&mut self) {
        self.calls.push("neuter_console".into());
    }

    fn intercept_network(&mut self) {
        self.calls.push("intercept_network".into());
    }

    fn request_reload(&mut self) {
        self.calls.push("request_reload".into());
        self.reload_requests += 1;
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a test subscriber once per process. Safe to call from every test.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}
