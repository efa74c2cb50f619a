//! Shared builders for unit tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use index_monitor::config::{
    BollingerSettings, IndicatorSettings, MaSettings, MacdSettings, RsiSettings, SignalSettings,
};
use index_monitor::models::indicators::{
    BollingerSeries, IndicatorSeries, IndicatorSet, MacdSeries, PriceBar,
};
use std::io;
use std::sync::{Arc, Mutex};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Daily bars with the given closes
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000.0 + i as f64,
                start_time() + Duration::days(i as i64),
            )
        })
        .collect()
}

/// Oscillating closes around 100
pub fn wave_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.05)
        .collect()
}

pub fn rsi_settings() -> RsiSettings {
    RsiSettings {
        period_short: 14,
        period_long: 28,
        oversold: 30.0,
        overbought: 70.0,
    }
}

pub fn indicator_settings() -> IndicatorSettings {
    IndicatorSettings {
        ma: MaSettings { short: 5, long: 20 },
        rsi: rsi_settings(),
        macd: MacdSettings {
            fast: 12,
            slow: 26,
            signal: 9,
        },
        bollinger: BollingerSettings {
            period: 20,
            std_dev: 2.0,
        },
    }
}

pub fn signal_settings(min_confirm: usize, tolerance: usize) -> SignalSettings {
    SignalSettings {
        min_confirm,
        lookback: 5,
        tolerance,
    }
}

fn series(name: &str, values: &[Option<f64>]) -> IndicatorSeries {
    IndicatorSeries::new(name, values.to_vec())
}

/// Hand-built indicator set of `len` bars; every series starts undefined
pub struct SetBuilder {
    pub set: IndicatorSet,
}

impl SetBuilder {
    pub fn new(closes: &[f64]) -> Self {
        let none = vec![None; closes.len()];
        let empty = |name: &str| series(name, &none);
        Self {
            set: IndicatorSet {
                timestamps: (0..closes.len())
                    .map(|i| start_time() + Duration::days(i as i64))
                    .collect(),
                closes: closes.to_vec(),
                ma_short: empty("MA5"),
                ma_long: empty("MA20"),
                rsi_short: empty("RSI14"),
                rsi_long: empty("RSI28"),
                macd: MacdSeries {
                    line: empty("MACD"),
                    signal: empty("MACD_Signal"),
                    histogram: empty("MACD_Histogram"),
                },
                bollinger: BollingerSeries {
                    upper: empty("BB_Upper"),
                    middle: empty("BB_Middle"),
                    lower: empty("BB_Lower"),
                },
            },
        }
    }

    pub fn ma(mut self, short: &[f64], long: &[f64]) -> Self {
        self.set.ma_short = series("MA5", &defined(short));
        self.set.ma_long = series("MA20", &defined(long));
        self
    }

    pub fn ma_long(mut self, long: &[f64]) -> Self {
        self.set.ma_long = series("MA20", &defined(long));
        self
    }

    pub fn rsi(mut self, values: &[f64]) -> Self {
        self.set.rsi_short = series("RSI14", &defined(values));
        self
    }

    pub fn macd(mut self, line: &[f64], signal: &[f64]) -> Self {
        self.set.macd.line = series("MACD", &defined(line));
        self.set.macd.signal = series("MACD_Signal", &defined(signal));
        self
    }

    pub fn bands(mut self, upper: &[f64], lower: &[f64]) -> Self {
        self.set.bollinger.upper = series("BB_Upper", &defined(upper));
        self.set.bollinger.lower = series("BB_Lower", &defined(lower));
        self
    }

    pub fn build(self) -> IndicatorSet {
        self.set
    }
}

pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// In-memory log sink for asserting on emitted events
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a plain-text subscriber and return what it logged
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}
