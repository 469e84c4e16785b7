use hvk_lockdown::*;

#[test]
fn scenario_sustained_elevation_reaches_suspect_after_debounce() {
    let cfg = LockdownConfig {
        low_threshold: 0.5,
        high_threshold: 0.9,
        debounce_window_ms: 500,
        ..LockdownConfig::sane_defaults()
    };
    let mut st = ControllerState::new();

    // Elevated at t=0..400: still within the debounce window.
    for t in (0..=400).step_by(100) {
        let d = evaluate(
            &cfg,
            &mut st,
            &TickInput {
                now_ms: t,
                score: 0.6,
                key_trigger: false,
            },
        );
        assert_eq!(d.transition, Transition::Stay);
    }

    // t=500: the run is exactly debounce_window old.
    let d = evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 500,
            score: 0.6,
            key_trigger: false,
        },
    );
    assert_eq!(d.transition, Transition::Escalate);
    assert_eq!(d.reason, ReasonCode::SustainedSignal);
    assert_eq!(d.command, None, "SUSPECT has no destructive effects");
    assert_eq!(st.state, EngineState::Suspect { since_ms: 500 });
}

#[test]
fn scenario_suspect_holds_while_signal_stays_elevated() {
    let cfg = LockdownConfig {
        debounce_window_ms: 0,
        ..LockdownConfig::sane_defaults()
    };
    let mut st = ControllerState::new();

    evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 0,
            score: 0.6,
            key_trigger: false,
        },
    );
    assert!(matches!(st.state, EngineState::Suspect { .. }));

    for t in (100..=2_000).step_by(100) {
        let d = evaluate(
            &cfg,
            &mut st,
            &TickInput {
                now_ms: t,
                score: 0.6,
                key_trigger: false,
            },
        );
        assert_eq!(d.transition, Transition::Stay);
        assert!(matches!(st.state, EngineState::Suspect { .. }));
    }
}
