//! CSV snapshots of fetched bars, and a provider that replays them

use crate::error::ArtifactError;
use crate::models::indicators::PriceBar;
use crate::services::market_data::{normalize_bars, FetchError, MarketDataProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LATEST_SNAPSHOT: &str = "latest_data.csv";

/// Writes dated and latest snapshots under the data directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{TICKER}_data_{YYYYMMDD}.csv`, with index carets stripped from the ticker
    pub fn dated_file_name(ticker: &str, date: NaiveDate) -> String {
        format!("{}_data_{}.csv", ticker.replace('^', ""), date.format("%Y%m%d"))
    }

    /// Save the dated snapshot and refresh `latest_data.csv`
    pub fn save(
        &self,
        ticker: &str,
        bars: &[PriceBar],
        date: NaiveDate,
    ) -> Result<Vec<PathBuf>, ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))?;

        let dated = self.dir.join(Self::dated_file_name(ticker, date));
        let latest = self.dir.join(LATEST_SNAPSHOT);
        for path in [&dated, &latest] {
            write_bars(path, bars)?;
        }

        info!(ticker, bars = bars.len(), path = %dated.display(), "Snapshot: saved price data");
        Ok(vec![dated, latest])
    }
}

pub fn write_bars(path: &Path, bars: &[PriceBar]) -> Result<(), ArtifactError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ArtifactError::csv(path, e))?;
    for bar in bars {
        writer.serialize(bar).map_err(|e| ArtifactError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ArtifactError::io(path, e))
}

pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>, FetchError> {
    let snapshot_error = |reason: String| FetchError::Snapshot {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| snapshot_error(e.to_string()))?;
    let bars = reader
        .deserialize::<PriceBar>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| snapshot_error(e.to_string()))?;
    Ok(normalize_bars(bars))
}

/// Replays a saved snapshot through the provider interface
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketDataProvider for SnapshotProvider {
    async fn fetch_history(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, FetchError> {
        info!(
            ticker,
            period,
            interval,
            path = %self.path.display(),
            "Snapshot: replaying saved data, period and interval are ignored"
        );
        let bars = read_bars(&self.path)?;
        if bars.is_empty() {
            return Err(FetchError::Empty {
                ticker: ticker.to_string(),
            });
        }
        Ok(bars)
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}
