//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs on stdout
//! - Development: Colorful, human-readable logs on stdout
//!
//! Both also write plain text to the per-day log file when one is given.

use crate::config::is_production;
use crate::error::ArtifactError;
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// `monitor_{YYYYMMDD}.log`
pub fn log_file_name(date: NaiveDate) -> String {
    format!("monitor_{}.log", date.format("%Y%m%d"))
}

/// Open (append) the log file for `date` under `dir`
pub fn open_log_file(dir: &Path, date: NaiveDate) -> Result<(File, PathBuf), ArtifactError> {
    fs::create_dir_all(dir).map_err(|e| ArtifactError::io(dir, e))?;
    let path = dir.join(log_file_name(date));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ArtifactError::io(&path, e))?;
    Ok((file, path))
}

/// Initialize logging
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str, log_file: Option<File>) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let production = is_production();

    let json = production.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stdout)
    });
    let pretty = (!production).then(|| {
        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(std::io::stdout)
    });
    let file = log_file.map(|file| {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .with(file)
        .try_init()
}
