//! Bars in, indicators and confirmed signals out.

use crate::config::RunConfig;
use crate::indicators::{ComputationError, IndicatorEngine};
use crate::models::indicators::{IndicatorSet, PriceBar};
use crate::signals::signal_generator::{SignalGenerator, SignalScan};

pub struct SignalEngine;

impl SignalEngine {
    /// Compute indicators for `bars` and scan them for signals
    pub fn evaluate(
        bars: &[PriceBar],
        config: &RunConfig,
    ) -> Result<(IndicatorSet, SignalScan), ComputationError> {
        let indicators = IndicatorEngine::new(config.indicators.clone()).compute(bars)?;
        let scan = SignalGenerator::from_config(config).scan(&indicators);
        Ok((indicators, scan))
    }
}
