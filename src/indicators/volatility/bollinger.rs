//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::{BollingerSeries, IndicatorSeries};

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// The deviation is the sample standard deviation of the window.
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let middle = math::rolling_mean(closes, period);
    let std = math::rolling_std(closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m + sign * std_dev * s),
                _ => None,
            })
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerSeries {
        upper: IndicatorSeries::new("BB_Upper", upper),
        middle: IndicatorSeries::new("BB_Middle", middle),
        lower: IndicatorSeries::new("BB_Lower", lower),
    }
}
