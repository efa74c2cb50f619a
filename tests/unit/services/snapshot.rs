//! Unit tests for CSV snapshots

use crate::test_utils::{bars_from_closes, indicator_settings, wave_closes};
use chrono::NaiveDate;
use index_monitor::indicators::IndicatorEngine;
use index_monitor::services::market_data::{FetchError, MarketDataProvider};
use index_monitor::services::snapshot::{read_bars, SnapshotProvider, SnapshotStore};
use tempfile::tempdir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

#[test]
fn test_dated_file_name_strips_caret() {
    assert_eq!(SnapshotStore::dated_file_name("^GSPC", date()), "GSPC_data_20240115.csv");
}

#[test]
fn test_save_writes_dated_and_latest() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("data"));
    let bars = bars_from_closes(&wave_closes(20));

    let paths = store.save("^GSPC", &bars, date()).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("GSPC_data_20240115.csv"));
    assert!(paths[1].ends_with("latest_data.csv"));
    for path in &paths {
        assert_eq!(read_bars(path).unwrap(), bars);
    }
}

#[test]
fn test_reloaded_snapshot_reproduces_indicators() {
    let dir = tempdir().unwrap();
    let bars = bars_from_closes(&wave_closes(250));
    let paths = SnapshotStore::new(dir.path()).save("SPY", &bars, date()).unwrap();

    let engine = IndicatorEngine::new(indicator_settings());
    let original = engine.compute(&bars).unwrap();
    let reloaded = engine.compute(&read_bars(&paths[1]).unwrap()).unwrap();
    assert_eq!(original, reloaded);
}

#[tokio::test]
async fn test_provider_replays_snapshot() {
    let dir = tempdir().unwrap();
    let bars = bars_from_closes(&wave_closes(30));
    let paths = SnapshotStore::new(dir.path()).save("SPY", &bars, date()).unwrap();

    let provider = SnapshotProvider::new(&paths[0]);
    assert_eq!(provider.name(), "snapshot");
    let replayed = provider.fetch_history("SPY", "1y", "1d").await.unwrap();
    assert_eq!(replayed, bars);
}

#[tokio::test]
async fn test_provider_missing_file() {
    let provider = SnapshotProvider::new("missing/latest_data.csv");
    let err = provider.fetch_history("SPY", "1y", "1d").await.unwrap_err();
    assert!(matches!(err, FetchError::Snapshot { .. }));
}

#[tokio::test]
async fn test_provider_empty_snapshot() {
    let dir = tempdir().unwrap();
    let paths = SnapshotStore::new(dir.path()).save("SPY", &[], date()).unwrap();
    let err = SnapshotProvider::new(&paths[1])
        .fetch_history("SPY", "1y", "1d")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Empty { .. }));
}

#[test]
fn test_corrupt_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "timestamp,open\nnot-a-date,abc\n").unwrap();
    assert!(matches!(read_bars(&path), Err(FetchError::Snapshot { .. })));
}
