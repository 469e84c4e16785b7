/// Lockdown policy (thresholds + windows). All durations are host-monotonic
/// milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct LockdownConfig {
    /// One tick at or above this score locks immediately.
    pub high_threshold: f64,

    /// At or above this score the page is considered elevated; sustained
    /// elevation escalates to SUSPECT after `debounce_window_ms`.
    pub low_threshold: f64,

    /// Minimum sustained elevation before OPEN → SUSPECT.
    pub debounce_window_ms: u64,

    /// Minimum sustained calm before SUSPECT → OPEN.
    pub cooldown_window_ms: u64,

    /// Whether (and how) the page may leave LOCKED.
    pub recovery: RecoveryPolicy,
}

impl LockdownConfig {
    pub fn sane_defaults() -> Self {
        Self {
            high_threshold: 0.9,
            low_threshold: 0.5,
            debounce_window_ms: 500,
            cooldown_window_ms: 2_000,
            recovery: RecoveryPolicy::HoldUntilReload,
        }
    }
}

/// Recovery policy for the LOCKED state.
///
/// Live DOM restoration after a destructive lock is unsafe; both variants
/// exit only through a full navigation reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// LOCKED is terminal for the page lifetime; the user reloads manually.
    HoldUntilReload,
    /// Request a reload once the score stays below the low threshold for
    /// `calm_ms`. Requested at most once.
    ReloadAfterCalm { calm_ms: u64 },
}

/// Engine lifecycle state. Exactly one instance per page load, written only
/// by the controller. Carries nothing but its entry tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Open,
    Suspect { since_ms: u64 },
    Locked { since_ms: u64 },
}

impl EngineState {
    pub fn is_open(&self) -> bool {
        matches!(self, EngineState::Open)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, EngineState::Locked { .. })
    }
}

/// Controller-owned mutable state.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerState {
    pub state: EngineState,

    /// Start of the current run of ticks at/above the low threshold
    /// (debounce tracking while OPEN).
    pub elevated_since_ms: Option<u64>,

    /// Start of the current run of ticks below the low threshold
    /// (cooldown tracking while SUSPECT, calm tracking while LOCKED).
    pub calm_since_ms: Option<u64>,

    /// Destructive effects have been commanded for this page load.
    pub effects_commanded: bool,

    /// A recovery reload has been requested; never repeated.
    pub reload_requested: bool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self {
            state: EngineState::Open,
            elevated_since_ms: None,
            calm_since_ms: None,
            effects_commanded: false,
            reload_requested: false,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

/// One controller tick's input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    pub now_ms: u64,

    /// Aggregated suspicion score for this tick, in [0, 1].
    pub score: f64,

    /// A reserved key chord fired since the previous tick. Bypasses scoring:
    /// these are unambiguous user actions, not noisy heuristics.
    pub key_trigger: bool,
}

/// Which way the state moved on this tick. Total: every tick yields exactly
/// one of these; no tick is dropped, no transition applied twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Escalate,
    Deescalate,
}

/// A side effect the runtime must execute as a consequence of this tick.
/// The controller never executes effects itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectCommand {
    /// Apply the destructive lockdown stack. Emitted at most once per page
    /// load, on the first entry into LOCKED.
    ApplyLockdown,
    /// Ask the host for a full navigation reload (soft recovery path).
    /// Emitted at most once.
    RequestReload,
}

/// Reason codes for decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReasonCode {
    Calm,
    SignalElevated,
    SustainedSignal,
    StrongSignal,
    KeyTrigger,
    AlreadyLocked,
    CooledDown,
    ReloadRecovery,
}

/// Controller output for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub transition: Transition,
    pub reason: ReasonCode,
    pub command: Option<EffectCommand>,
}
