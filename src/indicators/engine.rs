//! Computes every configured indicator over a bar sequence.

use crate::config::IndicatorSettings;
use crate::indicators::error::ComputationError;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::calculate_smas;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::{IndicatorSet, PriceBar};
use tracing::debug;

/// Pure and deterministic: the same bars and settings always produce the
/// same [`IndicatorSet`].
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    settings: IndicatorSettings,
}

impl IndicatorEngine {
    pub fn new(settings: IndicatorSettings) -> Self {
        Self { settings }
    }

    /// Compute all indicators. Windows longer than the history leave
    /// values undefined rather than failing.
    pub fn compute(&self, bars: &[PriceBar]) -> Result<IndicatorSet, ComputationError> {
        validate_settings(&self.settings)?;
        validate_bars(bars)?;

        let s = &self.settings;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let timestamps = bars.iter().map(|b| b.timestamp).collect();

        let (ma_short, ma_long) = calculate_smas(&closes, s.ma.short, s.ma.long);
        let rsi_short = calculate_rsi(&closes, s.rsi.period_short);
        let rsi_long = calculate_rsi(&closes, s.rsi.period_long);
        let macd = calculate_macd(&closes, s.macd.fast, s.macd.slow, s.macd.signal);
        let bollinger = calculate_bollinger_bands(&closes, s.bollinger.period, s.bollinger.std_dev);

        debug!(
            bars = bars.len(),
            ma_long_defined = ma_long.defined_count(),
            macd_signal_defined = macd.signal.defined_count(),
            "IndicatorEngine: computed indicators"
        );

        Ok(IndicatorSet {
            timestamps,
            closes,
            ma_short,
            ma_long,
            rsi_short,
            rsi_long,
            macd,
            bollinger,
        })
    }
}

fn validate_settings(s: &IndicatorSettings) -> Result<(), ComputationError> {
    let windows = [
        ("MA short", s.ma.short),
        ("MA long", s.ma.long),
        ("RSI short", s.rsi.period_short),
        ("RSI long", s.rsi.period_long),
        ("MACD fast", s.macd.fast),
        ("MACD slow", s.macd.slow),
        ("MACD signal", s.macd.signal),
    ];
    for (indicator, window) in windows {
        if window == 0 {
            return Err(ComputationError::InvalidWindow {
                indicator,
                reason: "window must be at least 1".to_string(),
            });
        }
    }
    if s.bollinger.period < 2 {
        return Err(ComputationError::InvalidWindow {
            indicator: "Bollinger",
            reason: format!("period must be at least 2, got {}", s.bollinger.period),
        });
    }
    Ok(())
}

fn validate_bars(bars: &[PriceBar]) -> Result<(), ComputationError> {
    if bars.is_empty() {
        return Err(ComputationError::EmptySeries);
    }
    for (index, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(ComputationError::InvalidPrice {
                index,
                value: bar.close,
            });
        }
        if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
            return Err(ComputationError::UnorderedTimestamps { index });
        }
    }
    Ok(())
}
