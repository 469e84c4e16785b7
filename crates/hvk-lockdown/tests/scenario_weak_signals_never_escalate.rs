use hvk_lockdown::*;

#[test]
fn scenario_scores_below_low_threshold_stay_open_forever() {
    let cfg = LockdownConfig::sane_defaults();
    let mut st = ControllerState::new();

    for i in 0..1_000u64 {
        let d = evaluate(
            &cfg,
            &mut st,
            &TickInput {
                now_ms: i * 50,
                score: 0.49,
                key_trigger: false,
            },
        );
        assert_eq!(d.transition, Transition::Stay);
        assert_eq!(d.reason, ReasonCode::Calm);
        assert_eq!(d.command, None);
    }
    assert_eq!(st.state, EngineState::Open);
}

#[test]
fn scenario_oscillation_faster_than_debounce_never_leaves_open() {
    // Score flips around the low threshold every 200 ms; debounce is 500 ms.
    // The elevation run never survives long enough to escalate.
    let cfg = LockdownConfig {
        low_threshold: 0.5,
        high_threshold: 0.9,
        debounce_window_ms: 500,
        ..LockdownConfig::sane_defaults()
    };
    let mut st = ControllerState::new();

    for i in 0..100u64 {
        let score = if i % 2 == 0 { 0.6 } else { 0.1 };
        let d = evaluate(
            &cfg,
            &mut st,
            &TickInput {
                now_ms: i * 200,
                score,
                key_trigger: false,
            },
        );
        assert_eq!(d.transition, Transition::Stay);
    }
    assert_eq!(st.state, EngineState::Open);
}

#[test]
fn scenario_short_elevation_burst_then_calm_stays_open() {
    // low=0.5, high=0.9, debounce=500ms;
    // [0.6, 0.6, 0.6] at 100 ms spacing (300 ms total), then 0.1.
    let cfg = LockdownConfig {
        low_threshold: 0.5,
        high_threshold: 0.9,
        debounce_window_ms: 500,
        ..LockdownConfig::sane_defaults()
    };
    let mut st = ControllerState::new();

    for (i, score) in [0.6, 0.6, 0.6].iter().enumerate() {
        let d = evaluate(
            &cfg,
            &mut st,
            &TickInput {
                now_ms: i as u64 * 100,
                score: *score,
                key_trigger: false,
            },
        );
        assert_eq!(d.transition, Transition::Stay);
        assert_eq!(d.reason, ReasonCode::SignalElevated);
    }

    let d = evaluate(
        &cfg,
        &mut st,
        &TickInput {
            now_ms: 300,
            score: 0.1,
            key_trigger: false,
        },
    );
    assert_eq!(d.reason, ReasonCode::Calm);
    assert_eq!(st.state, EngineState::Open);
    assert_eq!(st.elevated_since_ms, None);
}
