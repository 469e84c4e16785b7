use crate::{
    ControllerState, Decision, EffectCommand, EngineState, LockdownConfig, ReasonCode, RecoveryPolicy,
    TickInput, Transition,
};

/// One controller tick (pure deterministic logic + sticky state).
///
/// Evaluation order:
/// 1. LOCKED is sticky — further triggers are no-ops; only the soft recovery
///    policy can still produce a command, at most once.
/// 2. Key triggers lock immediately, regardless of score.
/// 3. A score at/above the high threshold locks immediately, no debounce.
/// 4. Otherwise OPEN/SUSPECT apply debounce and cooldown hysteresis.
pub fn evaluate(cfg: &LockdownConfig, st: &mut ControllerState, inp: &TickInput) -> Decision {
    if st.state.is_locked() {
        return tick_locked(cfg, st, inp);
    }

    if inp.key_trigger {
        return lock(st, inp.now_ms, ReasonCode::KeyTrigger);
    }

    if inp.score >= cfg.high_threshold {
        return lock(st, inp.now_ms, ReasonCode::StrongSignal);
    }

    match st.state {
        EngineState::Open => {
            if inp.score >= cfg.low_threshold {
                let since = *st.elevated_since_ms.get_or_insert(inp.now_ms);
                if inp.now_ms.saturating_sub(since) >= cfg.debounce_window_ms {
                    st.state = EngineState::Suspect { since_ms: inp.now_ms };
                    st.calm_since_ms = None;
                    return Decision {
                        transition: Transition::Escalate,
                        reason: ReasonCode::SustainedSignal,
                        command: None,
                    };
                }
                Decision {
                    transition: Transition::Stay,
                    reason: ReasonCode::SignalElevated,
                    command: None,
                }
            } else {
                // Elevation run broken: debounce restarts from scratch.
                st.elevated_since_ms = None;
                Decision {
                    transition: Transition::Stay,
                    reason: ReasonCode::Calm,
                    command: None,
                }
            }
        }

        EngineState::Suspect { .. } => {
            if inp.score >= cfg.low_threshold {
                st.calm_since_ms = None;
                Decision {
                    transition: Transition::Stay,
                    reason: ReasonCode::SignalElevated,
                    command: None,
                }
            } else {
                let since = *st.calm_since_ms.get_or_insert(inp.now_ms);
                if inp.now_ms.saturating_sub(since) >= cfg.cooldown_window_ms {
                    st.state = EngineState::Open;
                    st.elevated_since_ms = None;
                    st.calm_since_ms = None;
                    Decision {
                        transition: Transition::Deescalate,
                        reason: ReasonCode::CooledDown,
                        command: None,
                    }
                } else {
                    Decision {
                        transition: Transition::Stay,
                        reason: ReasonCode::Calm,
                        command: None,
                    }
                }
            }
        }

        // Handled by the early return above; kept total, not a panic path.
        EngineState::Locked { .. } => Decision {
            transition: Transition::Stay,
            reason: ReasonCode::AlreadyLocked,
            command: None,
        },
    }
}

/// Escalate into LOCKED. Effects are commanded only on the first entry for
/// this page load (idempotence across repeated lock triggers).
fn lock(st: &mut ControllerState, now_ms: u64, reason: ReasonCode) -> Decision {
    st.state = EngineState::Locked { since_ms: now_ms };
    st.elevated_since_ms = None;
    st.calm_since_ms = None;

    let command = if st.effects_commanded {
        None
    } else {
        st.effects_commanded = true;
        Some(EffectCommand::ApplyLockdown)
    };

    Decision {
        transition: Transition::Escalate,
        reason,
        command,
    }
}

/// Tick while LOCKED: double-lock is a no-op; the soft recovery policy may
/// request one reload after sustained calm.
fn tick_locked(cfg: &LockdownConfig, st: &mut ControllerState, inp: &TickInput) -> Decision {
    if let RecoveryPolicy::ReloadAfterCalm { calm_ms } = cfg.recovery {
        if inp.score < cfg.low_threshold {
            let since = *st.calm_since_ms.get_or_insert(inp.now_ms);
            if !st.reload_requested && inp.now_ms.saturating_sub(since) >= calm_ms {
                st.reload_requested = true;
                return Decision {
                    transition: Transition::Stay,
                    reason: ReasonCode::ReloadRecovery,
                    command: Some(EffectCommand::RequestReload),
                };
            }
        } else {
            st.calm_since_ms = None;
        }
    }

    Decision {
        transition: Transition::Stay,
        reason: ReasonCode::AlreadyLocked,
        command: None,
    }
}
