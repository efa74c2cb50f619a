//! Shared data models spanning the pipeline stages.

pub mod indicators;
pub mod signal;

pub use indicators::{BollingerSeries, IndicatorSeries, IndicatorSet, MacdSeries, PriceBar};
pub use signal::{LatestSignals, SignalConflict, SignalDirection, SignalEvent};
