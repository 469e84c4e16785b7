use crate::{LockScreen, NetworkGate, PageHost};

/// Input events suppressed (capturing phase) once the page is locked.
pub const SUPPRESSED_EVENTS: &[&str] = &[
    "keydown",
    "keyup",
    "mousedown",
    "mouseup",
    "mousemove",
    "click",
    "touchstart",
    "touchend",
    "touchmove",
    "contextmenu",
    "selectstart",
    "dragstart",
    "scroll",
    "resize",
];

/// Ordered, idempotent application of the destructive lockdown effects.
///
/// Order matters: the body swap happens first so nothing sensitive stays
/// rendered, then interaction is cut, then the console, then the network.
/// Reversal is only via full reload, never partial DOM restoration.
#[derive(Debug)]
pub struct EffectStack {
    gate: NetworkGate,
    applied: bool,
}

impl EffectStack {
    pub fn new(gate: NetworkGate) -> Self {
        Self {
            gate,
            applied: false,
        }
    }

    /// `true` once the stack has run for this page load.
    pub fn applied(&self) -> bool {
        self.applied
    }

    /// Apply the full stack once. Returns `false` (and touches nothing) on
    /// every call after the first.
    pub fn apply(&mut self, host: &mut dyn PageHost, screen: &LockScreen) -> bool {
        if self.applied {
            return false;
        }
        self.applied = true;

        // 1. Replace the document with the restricted view.
        host.replace_body(&screen.render());
        host.suppress_scroll();
        host.pin_history();

        // 2. No further page interaction.
        host.install_input_suppressors(SUPPRESSED_EVENTS);

        // 3. Mute the console.
        host.neuter_console();

        // 4. Outbound calls reject from here on.
        host.intercept_network();
        self.gate.lock();

        true
    }
}
