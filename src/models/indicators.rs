use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trading session of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Values of one indicator aligned with the price bars. `None` marks bars
/// still inside the indicator's warm-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Number of bars with a defined value
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Index of the first defined value
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Every indicator computed for one run, aligned with the bar timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub timestamps: Vec<DateTime<Utc>>,
    pub closes: Vec<f64>,
    pub ma_short: IndicatorSeries,
    pub ma_long: IndicatorSeries,
    pub rsi_short: IndicatorSeries,
    pub rsi_long: IndicatorSeries,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// All series in report column order
    pub fn series(&self) -> [&IndicatorSeries; 10] {
        [
            &self.ma_short,
            &self.ma_long,
            &self.rsi_short,
            &self.rsi_long,
            &self.macd.line,
            &self.macd.signal,
            &self.macd.histogram,
            &self.bollinger.upper,
            &self.bollinger.middle,
            &self.bollinger.lower,
        ]
    }
}
