use hvk_signals::*;

struct GeometryEnv {
    metrics: WindowMetrics,
}

impl PageEnv for GeometryEnv {
    fn window_metrics(&self) -> Option<WindowMetrics> {
        Some(self.metrics)
    }
    fn debugger_pause_ms(&mut self) -> Option<u64> {
        None
    }
    fn console_pause_ms(&mut self) -> Option<u64> {
        None
    }
    fn extension_manifest_name(&self) -> Option<String> {
        None
    }
    fn mutation_observer_supported(&self) -> bool {
        false
    }
}

#[test]
fn scenario_same_geometry_fires_under_one_threshold_not_the_other() {
    // 100 px of chrome on the height axis: a small docked pane.
    let mut env = GeometryEnv {
        metrics: WindowMetrics {
            inner_width: 1280,
            inner_height: 620,
            outer_width: 1280,
            outer_height: 720,
        },
    };

    let mut strict = SizeDeltaSource::new(50, 100);
    let mut lax = SizeDeltaSource::new(160, 100);

    assert_eq!(strict.sample(&mut env, 0).value, 1.0);
    assert_eq!(lax.sample(&mut env, 0).value, 0.0);
}

#[test]
fn scenario_width_axis_also_fires() {
    // Inspector docked to the side.
    let mut env = GeometryEnv {
        metrics: WindowMetrics {
            inner_width: 900,
            inner_height: 700,
            outer_width: 1280,
            outer_height: 720,
        },
    };

    let mut source = SizeDeltaSource::new(160, 100);
    assert_eq!(source.sample(&mut env, 0).value, 1.0);
    assert_eq!(source.last_value(), 1.0);
}

#[test]
fn scenario_inner_larger_than_outer_does_not_underflow() {
    // Some hosts report inner > outer (zoom artifacts). Saturating delta.
    let mut env = GeometryEnv {
        metrics: WindowMetrics {
            inner_width: 1300,
            inner_height: 800,
            outer_width: 1280,
            outer_height: 720,
        },
    };

    let mut source = SizeDeltaSource::new(50, 100);
    assert_eq!(source.sample(&mut env, 0).value, 0.0);
}
