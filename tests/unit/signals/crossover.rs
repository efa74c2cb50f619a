//! Unit tests for the crossing rule

use index_monitor::models::indicators::IndicatorSeries;
use index_monitor::signals::crossover::{crosses_above, crosses_below, crossing, Crossing, Line};

fn series(values: &[Option<f64>]) -> IndicatorSeries {
    IndicatorSeries::new("test", values.to_vec())
}

#[test]
fn test_crosses_above_series() {
    let a = series(&[Some(1.0), Some(3.0)]);
    let b = series(&[Some(2.0), Some(2.0)]);
    assert!(crosses_above((&a).into(), (&b).into(), 1));
    assert!(!crosses_below((&a).into(), (&b).into(), 1));
    assert_eq!(crossing((&a).into(), (&b).into(), 1), Some(Crossing::Above));
}

#[test]
fn test_touching_then_leaving_counts() {
    let a = series(&[Some(2.0), Some(1.0)]);
    let b = series(&[Some(2.0), Some(2.0)]);
    assert!(crosses_below((&a).into(), (&b).into(), 1));
}

#[test]
fn test_staying_above_is_not_a_cross() {
    let a = series(&[Some(3.0), Some(4.0)]);
    let b = series(&[Some(2.0), Some(2.0)]);
    assert_eq!(crossing((&a).into(), (&b).into(), 1), None);
}

#[test]
fn test_equal_values_do_not_cross() {
    let a = series(&[Some(2.0), Some(2.0)]);
    assert_eq!(crossing((&a).into(), Line::Level(2.0), 1), None);
}

#[test]
fn test_constant_level_and_closes() {
    let rsi = series(&[Some(25.0), Some(35.0)]);
    assert!(crosses_above((&rsi).into(), Line::Level(30.0), 1));

    let closes = [10.0, 8.0];
    let lower = series(&[Some(9.0), Some(9.0)]);
    assert!(crosses_below(Line::Closes(&closes), (&lower).into(), 1));
}

#[test]
fn test_undefined_bar_never_crosses() {
    let a = series(&[None, Some(3.0)]);
    let b = series(&[Some(2.0), Some(2.0)]);
    assert!(!crosses_above((&a).into(), (&b).into(), 1));
    assert!(!crosses_above((&b).into(), (&a).into(), 0));
}
