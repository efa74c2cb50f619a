//! Market data provider interface.

use crate::models::indicators::PriceBar;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no usable price bars for {ticker}")]
    Empty { ticker: String },

    #[error("cannot read snapshot {path}: {reason}")]
    Snapshot { path: PathBuf, reason: String },
}

/// Source of OHLCV history for a single ticker
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get historical bars, ordered by ascending timestamp
    async fn fetch_history(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, FetchError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Sort by timestamp and drop duplicate timestamps, keeping the last bar
pub fn normalize_bars(mut bars: Vec<PriceBar>) -> Vec<PriceBar> {
    bars.sort_by_key(|b| b.timestamp);
    let mut out: Vec<PriceBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}
