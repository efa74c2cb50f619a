//! Scheduled index monitor: fetches price history for one ticker, computes
//! technical indicators, confirms crossover signals and reports them.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod signals;

pub use error::MonitorError;
