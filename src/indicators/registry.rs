//! Closed set of indicators that vote on signal direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
}

impl IndicatorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorCategory::Momentum => "Momentum",
            IndicatorCategory::Trend => "Trend",
            IndicatorCategory::Volatility => "Volatility",
        }
    }
}

/// Every indicator able to confirm a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    MovingAverageCross,
    RsiReversal,
    MacdCross,
    BollingerReentry,
    PriceMaCross,
}

/// Number of voting indicators, upper bound for `min_confirm`
pub const INDICATOR_COUNT: usize = IndicatorKind::ALL.len();

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::MovingAverageCross,
        IndicatorKind::RsiReversal,
        IndicatorKind::MacdCross,
        IndicatorKind::BollingerReentry,
        IndicatorKind::PriceMaCross,
    ];

    /// Get the name of the indicator
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverageCross => "Moving average cross",
            IndicatorKind::RsiReversal => "RSI",
            IndicatorKind::MacdCross => "MACD",
            IndicatorKind::BollingerReentry => "Bollinger bands",
            IndicatorKind::PriceMaCross => "Price vs long MA",
        }
    }

    /// Get the category this indicator belongs to
    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::MovingAverageCross | IndicatorKind::PriceMaCross => {
                IndicatorCategory::Trend
            }
            IndicatorKind::RsiReversal | IndicatorKind::MacdCross => IndicatorCategory::Momentum,
            IndicatorKind::BollingerReentry => IndicatorCategory::Volatility,
        }
    }

    /// Human readable event, bullish first
    pub fn describe(&self, bullish: bool) -> &'static str {
        match (self, bullish) {
            (IndicatorKind::MovingAverageCross, true) => "Golden cross",
            (IndicatorKind::MovingAverageCross, false) => "Death cross",
            (IndicatorKind::RsiReversal, true) => "Oversold reversal",
            (IndicatorKind::RsiReversal, false) => "Overbought reversal",
            (IndicatorKind::MacdCross, true) => "Crossed above signal line",
            (IndicatorKind::MacdCross, false) => "Crossed below signal line",
            (IndicatorKind::BollingerReentry, true) => "Rebound from lower band",
            (IndicatorKind::BollingerReentry, false) => "Rejected at upper band",
            (IndicatorKind::PriceMaCross, true) => "Price broke above long MA",
            (IndicatorKind::PriceMaCross, false) => "Price fell below long MA",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
