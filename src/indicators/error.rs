use thiserror::Error;

/// Errors raised while computing indicators from a bar sequence
#[derive(Debug, Error, PartialEq)]
pub enum ComputationError {
    #[error("no price bars to compute indicators from")]
    EmptySeries,

    #[error("non-finite or non-positive close {value} at bar {index}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("timestamps not strictly ascending at bar {index}")]
    UnorderedTimestamps { index: usize },

    #[error("invalid window for {indicator}: {reason}")]
    InvalidWindow {
        indicator: &'static str,
        reason: String,
    },
}
