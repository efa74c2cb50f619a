//! Helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use index_monitor::config::RunConfig;
use index_monitor::models::indicators::PriceBar;
use index_monitor::services::market_data::{FetchError, MarketDataProvider};
use index_monitor::services::notifier::{EmailContent, Notifier, NotifyError};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Serves a fixed bar sequence
pub struct StaticProvider {
    bars: Vec<PriceBar>,
}

impl StaticProvider {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_history(
        &self,
        ticker: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<PriceBar>, FetchError> {
        if self.bars.is_empty() {
            return Err(FetchError::Empty {
                ticker: ticker.to_string(),
            });
        }
        Ok(self.bars.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Records every email instead of sending it
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<EmailContent>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<EmailContent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &EmailContent) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Always fails as if the password were missing
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _email: &EmailContent) -> Result<(), NotifyError> {
        Err(NotifyError::MissingPassword("EMAIL_PASSWORD".to_string()))
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 21, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(close, close, close, close, 1_000.0, start + Duration::days(i as i64))
        })
        .collect()
}

/// 60 flat bars followed by a jump that crosses both moving averages
pub fn breakout_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 60];
    closes.push(110.0);
    closes
}

/// Configuration writing every artifact under `root`
pub fn config_in(root: &Path, mode: &str, extra_run: &str) -> RunConfig {
    let yaml = format!(
        r#"
data:
  ticker: "TEST"
  period: "1y"
  interval: "1d"
indicators:
  ma: {{ short: 5, long: 20 }}
  rsi: {{ period_short: 14, period_long: 28, oversold: 30, overbought: 70 }}
  macd: {{ fast: 12, slow: 26, signal: 9 }}
  bollinger: {{ period: 20, std_dev: 2.0 }}
signals:
  min_confirm: 2
  lookback: 5
email:
  enabled: true
  smtp_server: "smtp.example.com"
  sender_email: "monitor@example.com"
  recipient_email: "me@example.com"
run:
  mode: {mode}
  notify: true
  plot: true
  save_data: true
  data_dir: "{root}/data"
  reports_dir: "{root}/reports"
  logs_dir: "{root}/logs"
{extra_run}
"#,
        mode = mode,
        root = root.display(),
        extra_run = extra_run,
    );
    RunConfig::from_yaml_str(&yaml).unwrap()
}
