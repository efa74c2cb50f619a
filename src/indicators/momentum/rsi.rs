//! RSI (Relative Strength Index) indicator

use crate::models::indicators::IndicatorSeries;

/// Column name of an RSI series
pub fn rsi_name(period: usize) -> String {
    format!("RSI{}", period)
}

/// Calculate RSI with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The seed averages are the simple means of the first `period` gains and
/// losses; afterwards `avg = (prev * (period - 1) + current) / period`.
/// Values are undefined for the first `period` bars.
pub fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return IndicatorSeries::new(rsi_name(period), values);
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| c.max(0.0);
    let loss = |c: f64| (-c).max(0.0);

    let n = period as f64;
    let mut avg_gain = changes[..period].iter().map(|&c| gain(c)).sum::<f64>() / n;
    let mut avg_loss = changes[..period].iter().map(|&c| loss(c)).sum::<f64>() / n;
    values[period] = Some(rsi_value(avg_gain, avg_loss));

    // changes[i - 1] is the move into bar i
    for i in (period + 1)..closes.len() {
        let change = changes[i - 1];
        avg_gain = (avg_gain * (n - 1.0) + gain(change)) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss(change)) / n;
        values[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    IndicatorSeries::new(rsi_name(period), values)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat series has no gains either
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}
