use super::*;

const EASES: [fn(f64) -> f64; 3] = [ease_in, ease_out, ease_in_out];

#[test]
fn endpoints_are_stable() {
    for ease in EASES {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
    }
}

#[test]
fn eases_increase_across_the_unit_interval() {
    for ease in EASES {
        let mut prev = ease(0.0);
        for i in 1..=100 {
            let v = ease(i as f64 / 100.0);
            assert!(v > prev);
            prev = v;
        }
    }
}

#[test]
fn quadratic_helpers_match_closed_forms() {
    assert_eq!(ease_in(0.5), 0.25);
    assert_eq!(ease_out(0.5), 0.75);
    assert_eq!(ease_in_out(0.25), 0.125);
    assert_eq!(ease_in_out(0.5), 0.5);
    assert_eq!(ease_in_out(0.75), 0.875);
}

#[test]
fn ease_in_out_is_symmetric() {
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        assert!((ease_in_out(t) + ease_in_out(1.0 - t) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn eases_extrapolate_outside_the_unit_interval() {
    assert_eq!(ease_in(-1.0), 1.0);
    assert_eq!(ease_out(2.0), 0.0);
}

#[test]
fn ping_pong_is_a_triangle() {
    assert_eq!(ping_pong(0.0), 0.0);
    assert_eq!(ping_pong(0.5), 1.0);
    assert_eq!(ping_pong(1.0), 0.0);
    assert_eq!(ping_pong(0.25), 0.5);

    let mut prev = ping_pong(0.0);
    for i in 1..=50 {
        let v = ping_pong(i as f64 / 100.0);
        assert!(v > prev);
        prev = v;
    }
    for i in 51..=100 {
        let v = ping_pong(i as f64 / 100.0);
        assert!(v < prev);
        prev = v;
    }
}
