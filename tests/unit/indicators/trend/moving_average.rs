//! Unit tests for the simple moving average

use crate::test_utils::wave_closes;
use approx::assert_relative_eq;
use index_monitor::indicators::trend::{calculate_sma, calculate_smas};

#[test]
fn test_sma_known_values() {
    let ma = calculate_sma(&[100.0, 102.0, 101.0, 105.0, 107.0], 3);
    assert_eq!(ma.name, "MA3");
    assert_eq!(ma.get(1), None);
    assert_relative_eq!(ma.get(2).unwrap(), 101.0);
    assert_relative_eq!(ma.get(3).unwrap(), 102.67, epsilon = 0.01);
}

#[test]
fn test_sma_defined_for_trailing_bars() {
    let closes = wave_closes(30);
    let ma = calculate_sma(&closes, 10);
    assert_eq!(ma.len(), 30);
    assert_eq!(ma.defined_count(), 30 - 10 + 1);
    assert_eq!(ma.first_defined(), Some(9));
}

#[test]
fn test_sma_window_longer_than_history_is_undefined() {
    let closes = wave_closes(10);
    let ma = calculate_sma(&closes, 50);
    assert_eq!(ma.len(), 10);
    assert_eq!(ma.defined_count(), 0);
    assert_eq!(ma.latest(), None);
}

#[test]
fn test_short_and_long_names() {
    let closes = wave_closes(60);
    let (short, long) = calculate_smas(&closes, 5, 20);
    assert_eq!(short.name, "MA5");
    assert_eq!(long.name, "MA20");
    assert!(short.defined_count() > long.defined_count());
}
