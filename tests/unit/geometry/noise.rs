use super::*;

#[test]
fn values_stay_in_unit_range() {
    let n = ValueNoise4::new(42);
    for i in 0..500 {
        let f = i as f64;
        let v = n.noise4(f * 0.37 - 40.0, f * -0.11, f * 0.05, f * 0.013);
        assert!((-1.0..=1.0).contains(&v), "{v}");
    }
}

#[test]
fn same_seed_same_field() {
    let a = ValueNoise4::new(7);
    let b = ValueNoise4::new(7);
    let c = ValueNoise4::new(8);
    let sample = |n: &ValueNoise4| n.noise4(0.3, -1.7, 2.25, 0.5);
    assert_eq!(sample(&a), sample(&b));
    assert_ne!(sample(&a), sample(&c));
}

#[test]
fn field_is_continuous_across_cells() {
    let n = ValueNoise4::new(3);
    let below = n.noise4(0.999_999, 0.5, 0.5, 0.5);
    let above = n.noise4(1.000_001, 0.5, 0.5, 0.5);
    assert!((below - above).abs() < 1e-4);
}

#[test]
fn field_interpolates_lattice_at_integer_points() {
    let n = ValueNoise4::new(11);
    assert_eq!(n.noise4(2.0, -3.0, 0.0, 5.0), n.lattice([2, -3, 0, 5]));
}

#[test]
fn closures_are_noise_sources() {
    let flat = |_x: f64, _y: f64, _z: f64, w: f64| w.sin();
    assert_eq!(flat.noise4(1.0, 2.0, 3.0, 0.0), 0.0);
}

#[test]
fn huge_coordinates_stay_in_unit_range() {
    let n = ValueNoise4::new(1);
    for w in [1e26, 1e30 * 1e-4, -1e26, f64::MAX] {
        let v = n.noise4(0.0, -1.5, 0.0, w);
        assert!((-1.0..=1.0).contains(&v), "{w}: {v}");
    }
    let v = n.noise4(f64::MAX, f64::MIN, 1e300, -1e300);
    assert!((-1.0..=1.0).contains(&v), "{v}");
}
