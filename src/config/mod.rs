//! Run configuration
//!
//! The YAML file is parsed once into an immutable [`RunConfig`] that is
//! passed by reference to every component. CLI flags produce a new
//! validated snapshot through [`RunConfig::with_overrides`].

use crate::core::scheduler::RunSchedule;
use crate::indicators::registry::INDICATOR_COUNT;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Ranges accepted by the Yahoo chart endpoint
pub const VALID_PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Bar intervals accepted by the Yahoo chart endpoint
pub const VALID_INTERVALS: &[&str] = &[
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo",
];

pub const DEFAULT_PROVIDER_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// How the run decides what to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Alert on fresh signals, weekly summary otherwise
    Auto,
    /// Always send a summary
    Manual,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Auto => "auto",
            RunMode::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub data: DataSettings,
    pub indicators: IndicatorSettings,
    pub signals: SignalSettings,
    pub email: EmailSettings,
    pub run: RunSettings,
}

/// Data source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    pub ticker: String,
    pub period: String,
    pub interval: String,

    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub ma: MaSettings,
    pub rsi: RsiSettings,
    pub macd: MacdSettings,
    pub bollinger: BollingerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaSettings {
    pub short: usize,
    pub long: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiSettings {
    pub period_short: usize,
    pub period_long: usize,
    pub oversold: f64,
    pub overbought: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSettings {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerSettings {
    pub period: usize,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSettings {
    /// Indicators that must agree before a signal is emitted
    pub min_confirm: usize,
    /// Bars scanned for the latest signals
    pub lookback: usize,
    /// Bars an indicator vote stays valid
    #[serde(default)]
    pub tolerance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub enabled: bool,

    #[serde(default)]
    pub smtp_server: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub sender_email: Option<String>,

    #[serde(default)]
    pub recipient_email: Option<String>,

    /// Name of the environment variable holding the SMTP password
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_password_env() -> String {
    "EMAIL_PASSWORD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub mode: RunMode,

    #[serde(default)]
    pub notify: bool,

    #[serde(default)]
    pub plot: bool,

    #[serde(default)]
    pub save_data: bool,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,

    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bars shown in the chart
    #[serde(default = "default_chart_days")]
    pub chart_days: usize,

    /// Cron expression of the external schedule, used to report the next run
    #[serde(default)]
    pub schedule: Option<String>,

    #[serde(default = "default_summary_weekday")]
    pub summary_weekday: Weekday,

    #[serde(default)]
    pub fail_on_notify_error: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chart_days() -> usize {
    120
}

fn default_summary_weekday() -> Weekday {
    Weekday::Mon
}

/// Flags given on the command line. Booleans can only enable a setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    pub mode: Option<RunMode>,
    pub notify: bool,
    pub plot: bool,
    pub save_data: bool,
    pub log_level: Option<String>,
}

impl RunConfig {
    /// Load and validate the configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "Config: loaded file");
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Warn when email is enabled but its password variable is unset.
    /// Returns false in that case; sending then fails with a `NotifyError`.
    pub fn check_email_password(&self) -> bool {
        if !self.email.enabled || self.email_password().is_some() {
            return true;
        }
        warn!(
            variable = %self.email.password_env,
            "Config: email password environment variable is not set, sending will fail"
        );
        false
    }

    /// Apply command-line overrides, returning a new validated snapshot
    pub fn with_overrides(&self, overrides: &RunOverrides) -> Result<Self, ConfigError> {
        let mut next = self.clone();
        if let Some(mode) = overrides.mode {
            next.run.mode = mode;
        }
        next.run.notify |= overrides.notify;
        next.run.plot |= overrides.plot;
        next.run.save_data |= overrides.save_data;
        if let Some(level) = &overrides.log_level {
            next.run.log_level = level.clone();
        }
        next.validate()?;
        Ok(next)
    }

    /// Secret read from the configured environment variable, never stored
    pub fn email_password(&self) -> Option<String> {
        std::env::var(&self.email.password_env)
            .ok()
            .filter(|v| !v.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_data()?;
        self.validate_indicators()?;
        self.validate_signals()?;
        self.validate_email()?;
        self.validate_run()
    }

    fn validate_data(&self) -> Result<(), ConfigError> {
        let data = &self.data;
        if data.ticker.trim().is_empty() {
            return Err(ConfigError::MissingField("data.ticker"));
        }
        if !VALID_PERIODS.contains(&data.period.as_str()) {
            return Err(invalid(
                "data.period",
                format!("'{}' is not one of {}", data.period, VALID_PERIODS.join(", ")),
            ));
        }
        if !VALID_INTERVALS.contains(&data.interval.as_str()) {
            return Err(invalid(
                "data.interval",
                format!("'{}' is not one of {}", data.interval, VALID_INTERVALS.join(", ")),
            ));
        }
        if data.provider_url.trim().is_empty() {
            return Err(ConfigError::MissingField("data.provider_url"));
        }
        if data.timeout_secs == 0 {
            return Err(invalid("data.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    fn validate_indicators(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        if ind.ma.short == 0 || ind.ma.short >= ind.ma.long {
            return Err(invalid(
                "indicators.ma",
                format!("need 0 < short < long, got {} and {}", ind.ma.short, ind.ma.long),
            ));
        }
        if ind.rsi.period_short == 0 || ind.rsi.period_long == 0 {
            return Err(invalid("indicators.rsi", "periods must be at least 1"));
        }
        let (low, high) = (ind.rsi.oversold, ind.rsi.overbought);
        if !(low.is_finite() && high.is_finite() && 0.0 <= low && low < high && high <= 100.0) {
            return Err(invalid(
                "indicators.rsi",
                format!("need 0 <= oversold < overbought <= 100, got {} and {}", low, high),
            ));
        }
        if ind.macd.fast == 0 || ind.macd.fast >= ind.macd.slow {
            return Err(invalid(
                "indicators.macd",
                format!("need 0 < fast < slow, got {} and {}", ind.macd.fast, ind.macd.slow),
            ));
        }
        if ind.macd.signal == 0 {
            return Err(invalid("indicators.macd.signal", "must be at least 1"));
        }
        if ind.bollinger.period < 2 {
            return Err(invalid("indicators.bollinger.period", "must be at least 2"));
        }
        if !(ind.bollinger.std_dev.is_finite() && ind.bollinger.std_dev > 0.0) {
            return Err(invalid(
                "indicators.bollinger.std_dev",
                format!("must be positive, got {}", ind.bollinger.std_dev),
            ));
        }
        Ok(())
    }

    fn validate_signals(&self) -> Result<(), ConfigError> {
        let signals = &self.signals;
        if !(1..=INDICATOR_COUNT).contains(&signals.min_confirm) {
            return Err(invalid(
                "signals.min_confirm",
                format!("must be between 1 and {}, got {}", INDICATOR_COUNT, signals.min_confirm),
            ));
        }
        if signals.lookback == 0 {
            return Err(invalid("signals.lookback", "must be at least 1"));
        }
        Ok(())
    }

    fn validate_email(&self) -> Result<(), ConfigError> {
        let email = &self.email;
        if !email.enabled {
            return Ok(());
        }
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !present(&email.smtp_server) {
            return Err(ConfigError::MissingField("email.smtp_server"));
        }
        if !present(&email.sender_email) {
            return Err(ConfigError::MissingField("email.sender_email"));
        }
        if !present(&email.recipient_email) {
            return Err(ConfigError::MissingField("email.recipient_email"));
        }
        if email.smtp_port == 0 {
            return Err(invalid("email.smtp_port", "must be non-zero"));
        }
        Ok(())
    }

    fn validate_run(&self) -> Result<(), ConfigError> {
        if self.run.chart_days == 0 {
            return Err(invalid("run.chart_days", "must be at least 1"));
        }
        RunSchedule::from_config(self)?;
        Ok(())
    }
}

/// Get the current deployment environment
///
/// Reads `MONITOR_ENV`, defaulting to `development`.
pub fn get_environment() -> String {
    std::env::var("MONITOR_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Whether logs should be emitted as JSON
pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}
