use hvk_config::*;

#[test]
fn scenario_default_policy_is_valid() {
    let policy = TamperPolicy::default();
    policy.validate().expect("defaults must validate");

    assert_eq!(policy.thresholds.high, 0.9);
    assert_eq!(policy.thresholds.low, 0.5);
    assert_eq!(policy.sources.size_delta.threshold_px, 160);
    assert!(policy
        .sources
        .tool_fingerprint
        .deny_list
        .contains(&"wireshark".to_string()));
    assert!(policy
        .key_triggers
        .iter()
        .any(|c| c.matches("f12", false, false, false)));
}

#[test]
fn scenario_partial_yaml_overlays_defaults() {
    let yaml = r#"
thresholds:
  high: 0.8
  low: 0.4
tick_interval_ms: 500
sources:
  size_delta:
    threshold_px: 50
"#;
    let policy: TamperPolicy = serde_yaml::from_str(yaml).unwrap();
    policy.validate().unwrap();

    assert_eq!(policy.thresholds.high, 0.8);
    assert_eq!(policy.sources.size_delta.threshold_px, 50);
    // Untouched knobs keep their defaults.
    assert_eq!(policy.sources.size_delta.cadence_ms, 500);
    assert!(policy.block_context_menu);
}

#[test]
fn scenario_inverted_thresholds_rejected() {
    let policy = TamperPolicy {
        thresholds: Thresholds {
            high: 0.3,
            low: 0.7,
            ..Thresholds::default()
        },
        ..TamperPolicy::default()
    };
    let err = policy.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds high threshold"));
}

#[test]
fn scenario_zero_tick_interval_rejected() {
    let policy = TamperPolicy {
        tick_interval_ms: 0,
        ..TamperPolicy::default()
    };
    assert!(policy.validate().is_err());
}

#[test]
fn scenario_unknown_weight_key_rejected() {
    let mut weights = std::collections::BTreeMap::new();
    weights.insert("battery_level".to_string(), 0.5);
    let policy = TamperPolicy {
        aggregation: AggregationPolicy::WeightedSum { weights },
        ..TamperPolicy::default()
    };
    let err = policy.validate().unwrap_err();
    assert!(err.to_string().contains("battery_level"));
}

#[test]
fn scenario_unknown_top_level_key_rejected_at_parse() {
    let yaml = "self_destruct: true\n";
    assert!(serde_yaml::from_str::<TamperPolicy>(yaml).is_err());
}

#[test]
fn scenario_key_chord_matching() {
    let chord = KeyChord::new("I", true, true, false);
    assert!(chord.matches("i", true, true, false));
    assert!(chord.matches("I", true, true, false));
    assert!(!chord.matches("I", true, false, false), "modifiers are exact");
    assert!(!chord.matches("J", true, true, false));
}
