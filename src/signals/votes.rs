//! Per-bar directional vote of each indicator kind.

use crate::config::RsiSettings;
use crate::indicators::registry::IndicatorKind;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::SignalDirection;
use crate::signals::crossover::{crosses_above, crosses_below, crossing, Crossing, Line};

/// Uniform interface over the closed set of voting indicators
pub trait DirectionalState {
    /// Direction this indicator points to at `index`, if it votes at all
    fn direction_at(
        &self,
        set: &IndicatorSet,
        rsi: &RsiSettings,
        index: usize,
    ) -> Option<SignalDirection>;
}

fn from_crossing(c: Option<Crossing>) -> Option<SignalDirection> {
    c.map(|c| match c {
        Crossing::Above => SignalDirection::Bullish,
        Crossing::Below => SignalDirection::Bearish,
    })
}

impl DirectionalState for IndicatorKind {
    fn direction_at(
        &self,
        set: &IndicatorSet,
        rsi: &RsiSettings,
        index: usize,
    ) -> Option<SignalDirection> {
        let closes = Line::Closes(&set.closes);
        match self {
            IndicatorKind::MovingAverageCross => from_crossing(crossing(
                (&set.ma_short).into(),
                (&set.ma_long).into(),
                index,
            )),
            IndicatorKind::RsiReversal => {
                let line = Line::from(&set.rsi_short);
                if crosses_above(line, Line::Level(rsi.oversold), index) {
                    Some(SignalDirection::Bullish)
                } else if crosses_below(line, Line::Level(rsi.overbought), index) {
                    Some(SignalDirection::Bearish)
                } else {
                    None
                }
            }
            IndicatorKind::MacdCross => from_crossing(crossing(
                (&set.macd.line).into(),
                (&set.macd.signal).into(),
                index,
            )),
            IndicatorKind::BollingerReentry => {
                // a collapsed band can satisfy both; rejection takes precedence
                if crosses_below(closes, (&set.bollinger.upper).into(), index) {
                    Some(SignalDirection::Bearish)
                } else if crosses_above(closes, (&set.bollinger.lower).into(), index) {
                    Some(SignalDirection::Bullish)
                } else {
                    None
                }
            }
            IndicatorKind::PriceMaCross => {
                from_crossing(crossing(closes, (&set.ma_long).into(), index))
            }
        }
    }
}
