//! Unit tests for rolling and exponential helpers

use approx::assert_relative_eq;
use index_monitor::common::math::{ema_series, rolling_mean, rolling_std, sample_std, subtract};

#[test]
fn test_rolling_mean_window_three() {
    let values = rolling_mean(&[100.0, 102.0, 101.0, 105.0, 107.0], 3);
    assert_eq!(values[0], None);
    assert_eq!(values[1], None);
    assert_relative_eq!(values[2].unwrap(), 101.0);
    assert_relative_eq!(values[3].unwrap(), 102.666_666_666_666_67, epsilon = 1e-9);
    assert_relative_eq!(values[4].unwrap(), 104.333_333_333_333_33, epsilon = 1e-9);
}

#[test]
fn test_rolling_mean_window_longer_than_input() {
    let values = rolling_mean(&[1.0, 2.0], 5);
    assert_eq!(values, vec![None, None]);
}

#[test]
fn test_rolling_mean_zero_window() {
    assert!(rolling_mean(&[1.0, 2.0, 3.0], 0).iter().all(Option::is_none));
}

#[test]
fn test_sample_std_uses_n_minus_one() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_relative_eq!(sample_std(&values), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);

    let rolling = rolling_std(&values, 8);
    assert!(rolling[..7].iter().all(Option::is_none));
    assert_relative_eq!(rolling[7].unwrap(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_rolling_std_requires_two_values() {
    assert!(rolling_std(&[1.0, 2.0, 3.0], 1).iter().all(Option::is_none));
}

#[test]
fn test_ema_series_seeded_with_first_value() {
    // span 3 gives alpha 0.5
    let ema = ema_series(&[1.0, 2.0, 3.0], 3);
    assert_eq!(ema.len(), 3);
    assert_relative_eq!(ema[0], 1.0);
    assert_relative_eq!(ema[1], 1.5);
    assert_relative_eq!(ema[2], 2.25);
}

#[test]
fn test_ema_series_empty() {
    assert!(ema_series(&[], 12).is_empty());
}

#[test]
fn test_subtract_requires_both_values() {
    let diff = subtract(&[Some(3.0), None, Some(1.0)], &[Some(1.0), Some(1.0), None]);
    assert_eq!(diff, vec![Some(2.0), None, None]);
}
