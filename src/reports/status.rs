//! Market status assessment of the latest bar

use crate::config::RsiSettings;
use crate::models::indicators::IndicatorSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Overbought,
    Oversold,
    Strong,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
        }
    }
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Overbought => "Overbought",
            Strength::Oversold => "Oversold",
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
        }
    }
}

impl Momentum {
    pub fn label(&self) -> &'static str {
        match self {
            Momentum::Bullish => "Bullish",
            Momentum::Bearish => "Bearish",
        }
    }
}

/// Latest indicator readings and their classification.
///
/// A classification is `None` while its inputs are still warming up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_long: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub trend: Option<Trend>,
    pub strength: Option<Strength>,
    pub momentum: Option<Momentum>,
}

impl MarketStatus {
    /// Assess the last bar of `set`; `None` for an empty set
    pub fn assess(set: &IndicatorSet, rsi_settings: &RsiSettings) -> Option<Self> {
        let date = set.latest_timestamp()?;
        let price = set.latest_close()?;

        let ma_long = set.ma_long.latest();
        let rsi = set.rsi_short.latest();
        let macd = set.macd.line.latest();
        let macd_signal = set.macd.signal.latest();

        let trend = ma_long.map(|ma| {
            if price > ma {
                Trend::Uptrend
            } else {
                Trend::Downtrend
            }
        });
        let strength = rsi.map(|r| {
            if r > rsi_settings.overbought {
                Strength::Overbought
            } else if r < rsi_settings.oversold {
                Strength::Oversold
            } else if r > 50.0 {
                Strength::Strong
            } else {
                Strength::Weak
            }
        });
        let momentum = macd.zip(macd_signal).map(|(line, signal)| {
            if line > signal {
                Momentum::Bullish
            } else {
                Momentum::Bearish
            }
        });

        Some(Self {
            date,
            price,
            ma_short: set.ma_short.latest(),
            ma_long,
            rsi,
            rsi_long: set.rsi_long.latest(),
            macd,
            macd_signal,
            macd_histogram: set.macd.histogram.latest(),
            bb_upper: set.bollinger.upper.latest(),
            bb_lower: set.bollinger.lower.latest(),
            trend,
            strength,
            momentum,
        })
    }
}
