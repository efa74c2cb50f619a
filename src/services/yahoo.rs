//! Yahoo Finance chart endpoint provider

use crate::config::DataSettings;
use crate::models::indicators::PriceBar;
use crate::services::market_data::{normalize_bars, FetchError, MarketDataProvider};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

pub struct YahooMarketDataProvider {
    client: Client,
    base_url: String,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Result<Self, FetchError> {
        Self::new(
            settings.provider_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn parse(ticker: &str, body: &str) -> Result<Vec<PriceBar>, FetchError> {
        let response: YahooResponse = serde_json::from_str(body)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        if let Some(error) = response.chart.error {
            return Err(FetchError::Provider {
                code: error.code,
                description: error.description,
            });
        }

        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            return Err(FetchError::Empty {
                ticker: ticker.to_string(),
            });
        };
        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(timestamps.len());
        let mut dropped = 0usize;
        for (i, &ts) in timestamps.iter().enumerate() {
            let field = |v: &Vec<Option<f64>>| v.get(i).copied().flatten();
            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) else {
                dropped += 1;
                continue;
            };
            let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
                return Err(FetchError::Malformed(format!("invalid timestamp {}", ts)));
            };
            let volume = field(&quote.volume).unwrap_or(0.0);
            bars.push(PriceBar::new(open, high, low, close, volume, timestamp));
        }

        if dropped > 0 {
            warn!(ticker, dropped, "Yahoo: dropped bars with missing OHLC fields");
        }

        let bars = normalize_bars(bars);
        if bars.is_empty() {
            return Err(FetchError::Empty {
                ticker: ticker.to_string(),
            });
        }
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_history(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, FetchError> {
        let url = format!("{}/{}", self.base_url, ticker);
        debug!(url = %url, period, interval, "Yahoo: requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[("range", period), ("interval", interval)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // error payloads carry a description worth surfacing
            if let Ok(YahooResponse {
                chart: ChartResult {
                    error: Some(error), ..
                },
            }) = serde_json::from_str::<YahooResponse>(&body)
            {
                return Err(FetchError::Provider {
                    code: error.code,
                    description: error.description,
                });
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let bars = Self::parse(ticker, &body)?;
        info!(
            ticker,
            bars = bars.len(),
            first = %bars[0].timestamp,
            last = %bars[bars.len() - 1].timestamp,
            "Yahoo: fetched price history"
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
