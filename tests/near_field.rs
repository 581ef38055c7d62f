use boomplot::data::near_field::{
    clamp_azimuth, pressure_at_angle, AngleState, NearFieldConfig, NearFieldView, Signature,
};

fn baseline() -> Signature {
    Signature {
        position: vec![0.0, 1.0, 2.0],
        pressure: vec![1.0, 2.0, 3.0],
    }
}

fn assert_close(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() < 1e-9, "{a:?} vs {b:?}");
    }
}

#[test]
fn zero_azimuth_is_identity() {
    assert_eq!(pressure_at_angle(&[1.0, 2.0, 3.0], 0.0), vec![1.0, 2.0, 3.0]);
}

#[test]
fn ninety_degrees_squares_pressure() {
    assert_close(&pressure_at_angle(&[1.0, 2.0, 3.0], 90.0), &[1.0, 4.0, 9.0]);
    assert_close(&pressure_at_angle(&[1.0, 2.0, 3.0], -90.0), &[1.0, 4.0, 9.0]);
}

#[test]
fn setting_same_angle_twice_is_idempotent() {
    let mut view = NearFieldView::new(baseline(), None, &NearFieldConfig::default());
    let first = view.set_angle(37).clone();
    let second = view.set_angle(37).clone();
    assert_eq!(first, second);
    assert_eq!(view.state(), AngleState::Idle);
    assert_eq!(view.azimuth(), 37);
    // baseline data is never modified
    assert_eq!(view.baseline(), &baseline());
}

#[test]
fn optimum_is_scaled_baseline() {
    let cfg = NearFieldConfig {
        optimum_scale: 0.8,
        initial_azimuth: 0,
    };
    let view = NearFieldView::new(baseline(), None, &cfg);
    assert_close(&view.curves().optimum.pressure, &[0.8, 1.6, 2.4]);
    assert_eq!(view.curves().baseline.position, vec![0.0, 1.0, 2.0]);
}

#[test]
fn ground_curve_is_optional() {
    let ground = Signature {
        position: vec![0.0, 1.0],
        pressure: vec![0.5, -0.5],
    };
    let mut view = NearFieldView::new(baseline(), Some(ground), &NearFieldConfig::default());
    assert!(view.curves().ground.is_some());
    let curves = view.set_angle(90);
    assert_close(&curves.ground.as_ref().unwrap().pressure, &[0.25, 0.25]);

    let view = NearFieldView::new(baseline(), None, &NearFieldConfig::default());
    assert!(view.curves().ground.is_none());
}

#[test]
fn azimuth_is_clamped_to_control_range() {
    assert_eq!(clamp_azimuth(120), 90);
    assert_eq!(clamp_azimuth(-91), -90);
    assert_eq!(clamp_azimuth(15), 15);
}
