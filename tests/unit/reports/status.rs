//! Unit tests for market status assessment

use crate::test_utils::{bars_from_closes, indicator_settings, rsi_settings, wave_closes};
use index_monitor::indicators::IndicatorEngine;
use index_monitor::reports::status::{MarketStatus, Momentum, Strength, Trend};

#[test]
fn test_rising_market() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
    let set = IndicatorEngine::new(indicator_settings())
        .compute(&bars_from_closes(&closes))
        .unwrap();

    let status = MarketStatus::assess(&set, &rsi_settings()).unwrap();
    assert_eq!(status.price, 179.0);
    assert_eq!(status.date, set.timestamps[79]);
    assert_eq!(status.trend, Some(Trend::Uptrend));
    assert_eq!(status.strength, Some(Strength::Overbought));
    assert_eq!(status.momentum, Some(Momentum::Bullish));
}

#[test]
fn test_falling_market() {
    let closes: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
    let set = IndicatorEngine::new(indicator_settings())
        .compute(&bars_from_closes(&closes))
        .unwrap();

    let status = MarketStatus::assess(&set, &rsi_settings()).unwrap();
    assert_eq!(status.trend, Some(Trend::Downtrend));
    assert_eq!(status.strength, Some(Strength::Oversold));
    assert_eq!(status.momentum, Some(Momentum::Bearish));
}

#[test]
fn test_warm_up_leaves_classifications_empty() {
    let set = IndicatorEngine::new(indicator_settings())
        .compute(&bars_from_closes(&wave_closes(5)))
        .unwrap();

    let status = MarketStatus::assess(&set, &rsi_settings()).unwrap();
    assert_eq!(status.ma_short, set.ma_short.latest());
    assert!(status.ma_short.is_some());
    assert_eq!(status.trend, None);
    assert_eq!(status.strength, None);
    assert_eq!(status.momentum, None);
}
