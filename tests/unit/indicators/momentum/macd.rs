//! Unit tests for MACD

use crate::test_utils::wave_closes;
use approx::assert_relative_eq;
use index_monitor::indicators::momentum::calculate_macd;

#[test]
fn test_macd_warm_up_masks() {
    let closes = wave_closes(60);
    let macd = calculate_macd(&closes, 12, 26, 9);
    assert_eq!(macd.line.first_defined(), Some(25));
    assert_eq!(macd.signal.first_defined(), Some(33));
    assert_eq!(macd.histogram.first_defined(), Some(33));
    assert_eq!(macd.line.len(), 60);
}

#[test]
fn test_macd_histogram_is_line_minus_signal() {
    let closes = wave_closes(200);
    let macd = calculate_macd(&closes, 12, 26, 9);
    for i in 0..closes.len() {
        match (macd.line.get(i), macd.signal.get(i)) {
            (Some(line), Some(signal)) => assert_eq!(macd.histogram.get(i), Some(line - signal)),
            _ => assert_eq!(macd.histogram.get(i), None),
        }
    }
}

#[test]
fn test_macd_recursive_ema() {
    // fast span 1 follows the close; slow span 2 has alpha 2/3
    let macd = calculate_macd(&[1.0, 2.0, 3.0], 1, 2, 1);
    assert_eq!(macd.line.get(0), None);
    assert_relative_eq!(macd.line.get(1).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(macd.line.get(2).unwrap(), 4.0 / 9.0, epsilon = 1e-12);
    assert_relative_eq!(macd.histogram.get(2).unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_macd_names() {
    let macd = calculate_macd(&wave_closes(40), 12, 26, 9);
    assert_eq!(macd.line.name, "MACD");
    assert_eq!(macd.signal.name, "MACD_Signal");
    assert_eq!(macd.histogram.name, "MACD_Histogram");
}

#[test]
fn test_macd_short_history_is_undefined() {
    let macd = calculate_macd(&wave_closes(10), 12, 26, 9);
    assert_eq!(macd.line.defined_count(), 0);
    assert_eq!(macd.signal.defined_count(), 0);
}
