use super::*;

#[test]
fn distance_xy_ignores_depth() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(3.0, 4.0, 100.0);
    assert_eq!(distance_xy(a, b), 5.0);
    assert_eq!(distance_xy(b, a), 5.0);
}

#[test]
fn finiteness_rejects_nan_and_inf() {
    assert!(is_finite_point(Point3::new(1.0, -2.0, 0.5)));
    assert!(!is_finite_point(Point3::new(f64::NAN, 0.0, 0.0)));
    assert!(!is_finite_point(Point3::new(0.0, f64::INFINITY, 0.0)));
}

#[test]
fn frame_index_orders_numerically() {
    assert!(FrameIndex(2) < FrameIndex(10));
}
