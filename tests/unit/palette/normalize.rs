use ndarray::array;

use super::*;

#[test]
fn new_validates_bounds() {
    assert!(Normalize::new(0.0, 1.0).is_ok());
    assert!(Normalize::new(2.0, 1.0).is_err());
    assert!(Normalize::new(f64::NAN, 1.0).is_err());
}

#[test]
fn autoscale_ignores_non_finite() {
    let n = Normalize::autoscale(&array![[f64::NAN, 2.0], [f64::INFINITY, -4.0]]);
    assert_eq!((n.vmin(), n.vmax()), (-4.0, 2.0));

    let all_nan = Normalize::autoscale(&array![[f64::NAN]]);
    assert_eq!((all_nan.vmin(), all_nan.vmax()), (0.0, 1.0));
}

#[test]
fn apply_is_linear_and_unclipped() {
    let n = Normalize::new(10.0, 20.0).unwrap();
    assert_eq!(n.apply(10.0), 0.0);
    assert_eq!(n.apply(15.0), 0.5);
    assert_eq!(n.apply(30.0), 2.0);
    assert!(n.apply(f64::NAN).is_nan());
}

#[test]
fn degenerate_range_maps_to_zero() {
    let n = Normalize::autoscale(&array![[3.0, 3.0]]);
    assert_eq!(n.apply(3.0), 0.0);
    assert_eq!(n.apply(100.0), 0.0);
}
