//! Unit tests for bar normalization

use crate::test_utils::bars_from_closes;
use index_monitor::services::market_data::normalize_bars;

#[test]
fn test_normalize_sorts_by_timestamp() {
    let mut bars = bars_from_closes(&[1.0, 2.0, 3.0]);
    bars.reverse();
    let normalized = normalize_bars(bars);
    let closes: Vec<f64> = normalized.iter().map(|b| b.close).collect();
    assert_eq!(closes, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_normalize_keeps_last_duplicate() {
    let mut bars = bars_from_closes(&[1.0, 2.0, 3.0]);
    let mut revised = bars[1];
    revised.close = 2.5;
    bars.push(revised);

    let normalized = normalize_bars(bars);
    assert_eq!(normalized.len(), 3);
    assert_eq!(normalized[1].close, 2.5);
    assert!(normalized.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}
