use gpui_line_chart::scales::{
    list_notches_for_range, scale_to_fit_range, sub_decimal_scale, sub_decimal_scale_to_number,
    value_range_for_fixed_bottom, value_range_for_fixed_notches, ChartScale, DecimalScaleState, Notch,
};
use rand::Rng;

#[test]
fn test_sub_decimal_scale_exact_rungs() {
    assert_eq!(sub_decimal_scale(1.0, true), 0.0);
    assert_eq!(sub_decimal_scale(2.0, true), 1.0);
    assert_eq!(sub_decimal_scale(5.0, false), 2.0);
    assert_eq!(sub_decimal_scale(10.0, false), 3.0);
    assert_eq!(sub_decimal_scale(20.0, true), 4.0);
    assert_eq!(sub_decimal_scale(0.1, true), -3.0);
    assert_eq!(sub_decimal_scale(0.0, true), f64::NEG_INFINITY);
}

#[test]
fn test_sub_decimal_scale_rounding_direction() {
    assert_eq!(sub_decimal_scale(3.0, true), 2.0);
    assert_eq!(sub_decimal_scale(3.0, false), 1.0);
    assert_eq!(sub_decimal_scale(7.0, true), 3.0);
    assert_eq!(sub_decimal_scale(7.0, false), 2.0);
    assert_eq!(sub_decimal_scale(1.5, true), 1.0);
    assert_eq!(sub_decimal_scale(1.5, false), 0.0);
}

#[test]
fn test_sub_decimal_scale_to_number() {
    assert_eq!(sub_decimal_scale_to_number(0.0), 1.0);
    assert_eq!(sub_decimal_scale_to_number(1.0), 2.0);
    assert_eq!(sub_decimal_scale_to_number(2.0), 5.0);
    assert_eq!(sub_decimal_scale_to_number(3.0), 10.0);
    assert_eq!(sub_decimal_scale_to_number(5.0), 50.0);
    assert_eq!(sub_decimal_scale_to_number(4.7), 20.0);
    assert_eq!(sub_decimal_scale_to_number(-3.0), 0.1);
}

#[test]
fn test_scale_to_fit_range() {
    assert_eq!(scale_to_fit_range(100.0, 5.0), 4.0);
    assert_eq!(scale_to_fit_range(90.0, 5.0), 4.0);
    assert_eq!(scale_to_fit_range(101.0, 5.0), 5.0);
}

#[test]
fn test_value_range_for_fixed_notches() {
    assert_eq!(
        value_range_for_fixed_notches(0.0, 100.0, 5.0),
        DecimalScaleState {
            min: 0.0,
            max: 100.0,
            notch_scale: 4.0
        }
    );
    assert_eq!(
        value_range_for_fixed_notches(3.0, 97.0, 5.0),
        DecimalScaleState {
            min: 0.0,
            max: 100.0,
            notch_scale: 4.0
        }
    );
}

#[test]
fn test_value_range_for_fixed_notches_bumps_the_scale() {
    // 20 fits the size but the aligned range stops at 100
    assert_eq!(
        value_range_for_fixed_notches(19.0, 101.0, 5.0),
        DecimalScaleState {
            min: 0.0,
            max: 250.0,
            notch_scale: 5.0
        }
    );
}

#[test]
fn test_value_range_for_fixed_bottom_keeps_the_top() {
    let state = value_range_for_fixed_bottom(3.0, 97.0, 5.0);
    assert_eq!(state.min, 0.0);
    assert_eq!(state.max, 97.0);
    assert_eq!(state.notch_scale, 4.0);
}

#[test]
fn test_list_notches_whole_scale() {
    let values: Vec<f64> = list_notches_for_range(0.0, 100.0, 4.0).map(|n| n.value).collect();
    assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert!(list_notches_for_range(0.0, 100.0, 4.0).all(|n| n.opacity == 1.0));
}

#[test]
fn test_list_notches_fractional_scale_blends_rungs() {
    let notches: Vec<Notch> = list_notches_for_range(0.0, 40.0, 3.5).collect();
    assert_eq!(
        notches,
        vec![
            Notch { value: 0.0, opacity: 1.0 },
            Notch { value: 10.0, opacity: 0.5 },
            Notch { value: 20.0, opacity: 1.0 },
            Notch { value: 30.0, opacity: 0.5 },
            Notch { value: 40.0, opacity: 1.0 },
        ]
    );
}

#[test]
fn test_list_notches_starts_at_the_first_visible_notch() {
    let values: Vec<f64> = list_notches_for_range(15.0, 55.0, 4.0).map(|n| n.value).collect();
    assert_eq!(values, vec![20.0, 40.0]);
}

#[test]
fn test_sub_decimal_scale_inverts_rung_values() {
    for rung in -30..=30 {
        let rung = rung as f64;
        let value = sub_decimal_scale_to_number(rung);
        for round_up in [false, true] {
            let back = sub_decimal_scale(value, round_up);
            assert_eq!(back, rung, "rung {rung}, value {value}, round_up {round_up}");
            assert_eq!(sub_decimal_scale_to_number(back), value);
        }
    }
}

#[test]
fn test_list_notches_random_ranges() {
    let mut rng = rand::rng();
    for i in 0..500 {
        let min = rng.random_range(-1000.0..1000.0);
        let max = min + rng.random_range(0.5..2000.0);
        let mut notch_scale = scale_to_fit_range(max - min, 5.0) - rng.random_range(0.0..1.0);
        if i % 4 == 0 {
            notch_scale = notch_scale.floor();
        }
        let epsilon = 1e-9 * min.abs().max(max.abs());

        let notches: Vec<Notch> = list_notches_for_range(min, max, notch_scale).collect();
        assert!(!notches.is_empty(), "{min}..{max} at {notch_scale}");
        for notch in &notches {
            assert!(notch.value >= min - epsilon && notch.value <= max, "{notch:?} in {min}..{max}");
            assert!((0.0..=1.0).contains(&notch.opacity), "{notch:?}");
            if notch_scale.fract() == 0.0 {
                assert_eq!(notch.opacity, 1.0, "{notch:?} at {notch_scale}");
            }
        }
        for pair in notches.windows(2) {
            assert!(pair[0].value < pair[1].value, "{pair:?} at {notch_scale}");
        }
    }
}

#[test]
fn test_cloned_notches_restart() {
    let notches = list_notches_for_range(-12.5, 87.0, 3.3);
    let copy = notches.clone();
    let first: Vec<Notch> = notches.collect();
    let second: Vec<Notch> = copy.collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_list_notches_degenerate_input() {
    assert_eq!(list_notches_for_range(f64::NAN, 10.0, 1.0).count(), 0);
    assert_eq!(list_notches_for_range(0.0, f64::INFINITY, 1.0).count(), 0);
    assert_eq!(list_notches_for_range(0.0, 10.0, f64::NEG_INFINITY).count(), 0);
    assert_eq!(list_notches_for_range(10.0, 0.0, 1.0).count(), 0);
}

#[test]
fn test_chart_scale_linear() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 200.0));
    assert_eq!(scale.map(50.0), 100.0);
    assert_eq!(scale.invert(100.0), 50.0);
    assert_eq!(scale.ratio(), 2.0);
}

#[test]
fn test_chart_scale_expands_empty_domain() {
    let scale = ChartScale::new_linear((5.0, 5.0), (0.0, 100.0));
    assert_eq!(scale.domain(), (4.5, 5.5));
    assert_eq!(scale.map(5.0), 50.0);
}
