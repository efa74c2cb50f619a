//! JSON report and signal table artifacts

use crate::config::RunMode;
use crate::error::ArtifactError;
use crate::models::signal::{LatestSignals, SignalConflict, SignalEvent};
use crate::reports::status::MarketStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const REPORT_FILE: &str = "latest_report.json";
pub const SIGNALS_FILE: &str = "signals.csv";

/// Summary of one run, written to `latest_report.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub ticker: String,
    pub period: String,
    pub interval: String,
    pub mode: RunMode,
    pub bar_count: usize,
    pub market_status: Option<MarketStatus>,
    pub latest_signals: LatestSignals,
    pub bullish_events: usize,
    pub bearish_events: usize,
    pub conflicts: Vec<SignalConflict>,
    pub chart: Option<String>,
    pub next_run: Option<DateTime<Utc>>,
}

/// One row of `signals.csv`
#[derive(Debug, Serialize)]
struct SignalRow<'a> {
    timestamp: DateTime<Utc>,
    bar_index: usize,
    direction: &'a str,
    price: f64,
    confidence_count: usize,
    indicators: String,
}

impl<'a> From<&'a SignalEvent> for SignalRow<'a> {
    fn from(event: &'a SignalEvent) -> Self {
        let indicators = event
            .confirming_indicators()
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            timestamp: event.timestamp(),
            bar_index: event.bar_index(),
            direction: event.direction().as_str(),
            price: event.price(),
            confidence_count: event.confidence_count(),
            indicators,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))
    }

    pub fn write_report(&self, report: &Report) -> Result<PathBuf, ArtifactError> {
        self.ensure_dir()?;
        let path = self.dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json).map_err(|e| ArtifactError::io(&path, e))?;
        info!(path = %path.display(), "Report: summary written");
        Ok(path)
    }

    /// Every event of the run, oldest first
    pub fn write_signals(&self, events: &[SignalEvent]) -> Result<PathBuf, ArtifactError> {
        self.ensure_dir()?;
        let path = self.dir.join(SIGNALS_FILE);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| ArtifactError::csv(&path, e))?;
        // headers come from the first row; an empty table still gets them
        if events.is_empty() {
            writer
                .write_record([
                    "timestamp",
                    "bar_index",
                    "direction",
                    "price",
                    "confidence_count",
                    "indicators",
                ])
                .map_err(|e| ArtifactError::csv(&path, e))?;
        }
        for event in events {
            writer
                .serialize(SignalRow::from(event))
                .map_err(|e| ArtifactError::csv(&path, e))?;
        }
        writer.flush().map_err(|e| ArtifactError::io(&path, e))?;
        info!(path = %path.display(), events = events.len(), "Report: signal table written");
        Ok(path)
    }
}
