//! Simple moving average of the close

use crate::common::math;
use crate::models::indicators::IndicatorSeries;

/// Column name of a moving average series
pub fn ma_name(period: usize) -> String {
    format!("MA{}", period)
}

/// Calculate the simple moving average over `period` bars.
///
/// The first `period - 1` values are undefined. A period longer than the
/// history yields an all-undefined series.
pub fn calculate_sma(closes: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(ma_name(period), math::rolling_mean(closes, period))
}

/// Calculate short and long moving averages at once
pub fn calculate_smas(closes: &[f64], short: usize, long: usize) -> (IndicatorSeries, IndicatorSeries) {
    (calculate_sma(closes, short), calculate_sma(closes, long))
}
