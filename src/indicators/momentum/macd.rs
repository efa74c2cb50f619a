//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::{IndicatorSeries, MacdSeries};

pub const MACD_LINE: &str = "MACD";
pub const MACD_SIGNAL: &str = "MACD_Signal";
pub const MACD_HISTOGRAM: &str = "MACD_Histogram";

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// EMAs use the recursive form seeded with the first close. The line is
/// reported from bar `slow - 1`, the signal from bar `slow + signal - 2`.
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let len = closes.len();
    let fast = math::ema_series(closes, fast_period);
    let slow = math::ema_series(closes, slow_period);
    let raw_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let raw_signal = math::ema_series(&raw_line, signal_period);

    let line_start = slow_period.saturating_sub(1);
    let signal_start = (slow_period + signal_period).saturating_sub(2);

    let line: Vec<Option<f64>> = (0..len)
        .map(|i| (i >= line_start).then(|| raw_line[i]))
        .collect();
    let signal: Vec<Option<f64>> = (0..len)
        .map(|i| (i >= signal_start).then(|| raw_signal[i]))
        .collect();
    let histogram = math::subtract(&line, &signal);

    MacdSeries {
        line: IndicatorSeries::new(MACD_LINE, line),
        signal: IndicatorSeries::new(MACD_SIGNAL, signal),
        histogram: IndicatorSeries::new(MACD_HISTOGRAM, histogram),
    }
}
