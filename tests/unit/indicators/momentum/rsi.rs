//! Unit tests for RSI with Wilder smoothing

use crate::test_utils::wave_closes;
use approx::assert_relative_eq;
use index_monitor::indicators::momentum::calculate_rsi;

#[test]
fn test_rsi_warm_up() {
    let closes = wave_closes(30);
    let rsi = calculate_rsi(&closes, 14);
    assert_eq!(rsi.name, "RSI14");
    assert!(rsi.values[..14].iter().all(Option::is_none));
    assert!(rsi.values[14..].iter().all(Option::is_some));
}

#[test]
fn test_rsi_wilder_smoothing() {
    // changes +1, -1, +1; seed averages 0.5 / 0.5, then (0.5 + 1) / 2 and 0.5 / 2
    let rsi = calculate_rsi(&[1.0, 2.0, 1.0, 2.0], 2);
    assert_eq!(rsi.get(1), None);
    assert_relative_eq!(rsi.get(2).unwrap(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(rsi.get(3).unwrap(), 75.0, epsilon = 1e-9);
}

#[test]
fn test_rsi_only_gains_is_100() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let rsi = calculate_rsi(&closes, 14);
    assert_eq!(rsi.latest(), Some(100.0));
}

#[test]
fn test_rsi_only_losses_is_0() {
    let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
    let rsi = calculate_rsi(&closes, 14);
    assert_eq!(rsi.latest(), Some(0.0));
}

#[test]
fn test_rsi_flat_series_is_neutral() {
    let closes = vec![100.0; 30];
    let rsi = calculate_rsi(&closes, 14);
    assert!(rsi.values[14..].iter().all(|v| *v == Some(50.0)));
}

#[test]
fn test_rsi_always_bounded() {
    let closes = wave_closes(300);
    let rsi = calculate_rsi(&closes, 14);
    for value in rsi.values.iter().flatten() {
        assert!((0.0..=100.0).contains(value), "RSI out of range: {}", value);
    }
}

#[test]
fn test_rsi_window_longer_than_history() {
    let rsi = calculate_rsi(&[1.0, 2.0, 3.0], 14);
    assert_eq!(rsi.len(), 3);
    assert_eq!(rsi.defined_count(), 0);
}
