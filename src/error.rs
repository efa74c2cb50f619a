//! Error taxonomy of a monitor run and its process exit codes.

use crate::config::ConfigError;
use crate::indicators::ComputationError;
use crate::services::market_data::FetchError;
use crate::services::notifier::NotifyError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to write a data, report, chart or log artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArtifactError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        ArtifactError::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Any error that ends a run
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("indicator computation failed: {0}")]
    Computation(#[from] ComputationError),

    #[error("artifact write failed: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}

impl MonitorError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::Config(_) => 2,
            MonitorError::Fetch(_) => 3,
            MonitorError::Computation(_) => 4,
            MonitorError::Artifact(_) => 5,
            MonitorError::Notify(_) => 6,
        }
    }
}
