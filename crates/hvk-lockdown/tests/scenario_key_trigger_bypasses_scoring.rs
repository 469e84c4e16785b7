use hvk_lockdown::*;

#[test]
fn scenario_key_trigger_locks_at_zero_score() {
    let cfg = LockdownConfig::sane_defaults();
    let mut st = ControllerState::new();

    let d = evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 0,
            score: 0.0,
            key_trigger: true,
        },
    );

    assert_eq!(d.transition, Transition::Escalate);
    assert_eq!(d.reason, ReasonCode::KeyTrigger);
    assert_eq!(d.command, Some(EffectCommand::ApplyLockdown));
    assert_eq!(st.state, EngineState::Locked { since_ms: 0 });
}

#[test]
fn scenario_key_trigger_wins_over_strong_score_as_reason() {
    // Both present on one tick: the key trigger is the unambiguous action
    // and is reported as the reason.
    let cfg = LockdownConfig::sane_defaults();
    let mut st = ControllerState::new();

    let d = evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 0,
            score: 0.95,
            key_trigger: true,
        },
    );
    assert_eq!(d.reason, ReasonCode::KeyTrigger);
    assert!(st.state.is_locked());
}

#[test]
fn scenario_key_trigger_while_locked_is_noop() {
    let cfg = LockdownConfig::sane_defaults();
    let mut st = ControllerState::new();

    evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 0,
            score: 0.0,
            key_trigger: true,
        },
    );
    let d = evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 50,
            score: 0.0,
            key_trigger: true,
        },
    );
    assert_eq!(d.transition, Transition::Stay);
    assert_eq!(d.reason, ReasonCode::AlreadyLocked);
    assert_eq!(d.command, None);
}
