use crate::config::{RsiSettings, RunConfig, SignalSettings};
use crate::indicators::registry::IndicatorKind;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::{LatestSignals, SignalConflict, SignalDirection, SignalEvent};
use crate::signals::votes::DirectionalState;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Turns indicator votes into confirmed signal events.
pub struct SignalGenerator {
    signals: SignalSettings,
    rsi: RsiSettings,
}

/// Everything found while scanning one indicator set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalScan {
    pub events: Vec<SignalEvent>,
    pub conflicts: Vec<SignalConflict>,
    pub bar_count: usize,
}

impl SignalScan {
    /// Most recent bullish and bearish events among the last `lookback` bars
    pub fn latest(&self, lookback: usize) -> LatestSignals {
        let first_bar = self.bar_count.saturating_sub(lookback);
        let latest_of = |direction: SignalDirection| {
            self.events
                .iter()
                .rev()
                .take_while(|e| e.bar_index() >= first_bar)
                .find(|e| e.direction() == direction)
                .cloned()
        };

        LatestSignals {
            lookback,
            latest_bullish: latest_of(SignalDirection::Bullish),
            latest_bearish: latest_of(SignalDirection::Bearish),
        }
    }

    pub fn count(&self, direction: SignalDirection) -> usize {
        self.events.iter().filter(|e| e.direction() == direction).count()
    }
}

impl SignalGenerator {
    pub fn new(signals: SignalSettings, rsi: RsiSettings) -> Self {
        Self { signals, rsi }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.signals, config.indicators.rsi)
    }

    /// Indicators whose most recent vote within the tolerance window points
    /// in each direction at `index`
    fn confirmations(
        &self,
        set: &IndicatorSet,
        index: usize,
    ) -> (BTreeSet<IndicatorKind>, BTreeSet<IndicatorKind>) {
        let mut bullish = BTreeSet::new();
        let mut bearish = BTreeSet::new();
        let earliest = index.saturating_sub(self.signals.tolerance);

        for kind in IndicatorKind::ALL {
            let vote = (earliest..=index)
                .rev()
                .find_map(|i| kind.direction_at(set, &self.rsi, i));
            match vote {
                Some(SignalDirection::Bullish) => {
                    bullish.insert(kind);
                }
                Some(SignalDirection::Bearish) => {
                    bearish.insert(kind);
                }
                None => {}
            }
        }
        (bullish, bearish)
    }

    /// Scan every bar and emit events where at least `min_confirm`
    /// indicators agree. When both directions qualify on one bar nothing is
    /// emitted and the bar is recorded as a conflict.
    pub fn scan(&self, set: &IndicatorSet) -> SignalScan {
        let min_confirm = self.signals.min_confirm;
        let mut scan = SignalScan {
            bar_count: set.len(),
            ..SignalScan::default()
        };

        for index in 1..set.len() {
            let (bullish, bearish) = self.confirmations(set, index);
            let timestamp = set.timestamps[index];
            let price = set.closes[index];

            match (bullish.len() >= min_confirm, bearish.len() >= min_confirm) {
                (true, true) => {
                    warn!(
                        bar = index,
                        timestamp = %timestamp,
                        bullish = bullish.len(),
                        bearish = bearish.len(),
                        "SignalGenerator: both directions confirmed on one bar, no signal emitted"
                    );
                    scan.conflicts.push(SignalConflict {
                        timestamp,
                        bar_index: index,
                        price,
                        bullish,
                        bearish,
                    });
                }
                (true, false) => scan.events.push(SignalEvent::new(
                    timestamp,
                    index,
                    price,
                    SignalDirection::Bullish,
                    bullish,
                )),
                (false, true) => scan.events.push(SignalEvent::new(
                    timestamp,
                    index,
                    price,
                    SignalDirection::Bearish,
                    bearish,
                )),
                (false, false) => {}
            }
        }

        debug!(
            bars = scan.bar_count,
            bullish = scan.count(SignalDirection::Bullish),
            bearish = scan.count(SignalDirection::Bearish),
            conflicts = scan.conflicts.len(),
            "SignalGenerator: scan complete"
        );
        scan
    }
}
