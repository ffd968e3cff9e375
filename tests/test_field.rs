use recursive_field::{angle, golden_angle, position, radius, FieldError};

#[test]
fn test_golden_angle() {
    assert!((golden_angle() - 137.508).abs() < 0.01);
}

#[test]
fn test_position_magnitude_for_many_scales() {
    for a in [0.5, 1.0, 3.0, 10.0] {
        for n in 1..=200 {
            let (x, y) = position(n, a).unwrap();
            let r = radius(n, a).unwrap();
            assert!(((x * x + y * y).sqrt() - r).abs() < 1e-10, "n={} a={}", n, a);
        }
    }
}

#[test]
fn test_angle_range() {
    for n in 1..1000 {
        let theta = angle(n);
        assert!(theta >= 0.0 && theta < 360.0);
    }
}

#[test]
fn test_invalid_index() {
    for n in [0, -1, -42] {
        assert_eq!(radius(n, 3.0), Err(FieldError::InvalidIndex { n }));
        let err = position(n, 3.0).unwrap_err();
        assert_eq!(err.to_string(), "Index n must be positive");
    }
}

#[test]
fn test_lucas_radius_square_additivity() {
    // (r_n / a)^2 == n, and 4 + 7 == 11
    let a = 3.0;
    let r4 = radius(4, a).unwrap() / a;
    let r7 = radius(7, a).unwrap() / a;
    let r11 = radius(11, a).unwrap() / a;
    assert!((r4 * r4 + r7 * r7 - r11 * r11).abs() < 1e-10);
}

#[test]
fn test_positions_are_distinct() {
    let points: Vec<(f64, f64)> = (1..6).map(|n| position(n, 3.0).unwrap()).collect();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            assert!((dx * dx + dy * dy).sqrt() > 1e-6);
        }
    }
}
