use crate::indicators::registry::IndicatorKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

impl SignalDirection {
    pub fn is_bullish(self) -> bool {
        self == SignalDirection::Bullish
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalDirection::Bullish => "bullish",
            SignalDirection::Bearish => "bearish",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed buy or sell signal at one bar.
///
/// Only the signal generator creates events; every field is read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    timestamp: DateTime<Utc>,
    bar_index: usize,
    price: f64,
    direction: SignalDirection,
    confirming_indicators: BTreeSet<IndicatorKind>,
    confidence_count: usize,
}

impl SignalEvent {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        bar_index: usize,
        price: f64,
        direction: SignalDirection,
        confirming_indicators: BTreeSet<IndicatorKind>,
    ) -> Self {
        let confidence_count = confirming_indicators.len();
        Self {
            timestamp,
            bar_index,
            price,
            direction,
            confirming_indicators,
            confidence_count,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn bar_index(&self) -> usize {
        self.bar_index
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn direction(&self) -> SignalDirection {
        self.direction
    }

    pub fn confirming_indicators(&self) -> &BTreeSet<IndicatorKind> {
        &self.confirming_indicators
    }

    pub fn confidence_count(&self) -> usize {
        self.confidence_count
    }

    pub fn is_confirmed_by(&self, kind: IndicatorKind) -> bool {
        self.confirming_indicators.contains(&kind)
    }
}

/// Both directions reached the confirmation threshold on the same bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConflict {
    pub timestamp: DateTime<Utc>,
    pub bar_index: usize,
    pub price: f64,
    pub bullish: BTreeSet<IndicatorKind>,
    pub bearish: BTreeSet<IndicatorKind>,
}

/// Most recent event per direction inside the lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSignals {
    pub lookback: usize,
    pub latest_bullish: Option<SignalEvent>,
    pub latest_bearish: Option<SignalEvent>,
}

impl LatestSignals {
    pub fn is_empty(&self) -> bool {
        self.latest_bullish.is_none() && self.latest_bearish.is_none()
    }

    pub fn events(&self) -> impl Iterator<Item = &SignalEvent> {
        self.latest_bullish.iter().chain(self.latest_bearish.iter())
    }
}
