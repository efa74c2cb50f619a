//! One monitor run: fetch, compute, report, notify.

use crate::config::{RunConfig, RunMode};
use crate::core::scheduler::RunSchedule;
use crate::error::MonitorError;
use crate::models::signal::{LatestSignals, SignalDirection};
use crate::reports::chart::{render_svg, ChartWriter};
use crate::reports::email;
use crate::reports::report::{Report, ReportWriter};
use crate::reports::status::MarketStatus;
use crate::services::market_data::{FetchError, MarketDataProvider};
use crate::services::notifier::{EmailContent, Notifier};
use crate::services::snapshot::SnapshotStore;
use crate::signals::engine::SignalEngine;
use chrono::{DateTime, Datelike, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub bar_count: usize,
    pub bullish_events: usize,
    pub bearish_events: usize,
    pub conflicts: usize,
    pub latest: LatestSignals,
    pub market_status: Option<MarketStatus>,
    pub report_path: PathBuf,
    pub signals_path: PathBuf,
    pub chart_path: Option<PathBuf>,
    pub snapshot_paths: Vec<PathBuf>,
    pub emails_sent: usize,
    pub notify_failures: usize,
    pub next_run: Option<DateTime<Utc>>,
}

/// Sequential pipeline over one immutable configuration
pub struct MonitorRuntime {
    config: RunConfig,
    provider: Box<dyn MarketDataProvider>,
    notifier: Option<Box<dyn Notifier>>,
    now: Option<DateTime<Utc>>,
}

impl MonitorRuntime {
    pub fn new(config: RunConfig, provider: Box<dyn MarketDataProvider>) -> Self {
        Self {
            config,
            provider,
            notifier: None,
            now: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Fix the run time instead of reading the system clock
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<RunSummary, MonitorError> {
        let config = &self.config;
        let now = self.now.unwrap_or_else(Utc::now);
        let data = &config.data;

        info!(
            ticker = %data.ticker,
            period = %data.period,
            interval = %data.interval,
            provider = self.provider.name(),
            mode = config.run.mode.as_str(),
            "MonitorRuntime: starting run"
        );

        let bars = match self
            .provider
            .fetch_history(&data.ticker, &data.period, &data.interval)
            .await
        {
            Ok(bars) => bars,
            Err(e) => {
                self.report_fetch_failure(now, &e).await;
                return Err(e.into());
            }
        };

        let snapshot_paths = if config.run.save_data {
            SnapshotStore::new(&config.run.data_dir).save(&data.ticker, &bars, now.date_naive())?
        } else {
            Vec::new()
        };

        let (indicators, scan) = SignalEngine::evaluate(&bars, config)?;
        let latest = scan.latest(config.signals.lookback);
        let market_status = MarketStatus::assess(&indicators, &config.indicators.rsi);

        if let Some(status) = &market_status {
            info!(
                price = status.price,
                trend = status.trend.map(|t| t.label()).unwrap_or("n/a"),
                strength = status.strength.map(|s| s.label()).unwrap_or("n/a"),
                momentum = status.momentum.map(|m| m.label()).unwrap_or("n/a"),
                "MonitorRuntime: market assessed"
            );
        }

        let chart_path = if config.run.plot {
            let svg = render_svg(
                &data.ticker,
                &indicators,
                &scan.events,
                &config.indicators.rsi,
                config.run.chart_days,
            );
            Some(ChartWriter::new(&config.run.reports_dir).write(&svg, now)?)
        } else {
            None
        };

        let next_run = RunSchedule::from_config(config)?.and_then(|s| s.next_after(now));

        let report = Report {
            generated_at: now,
            ticker: data.ticker.clone(),
            period: data.period.clone(),
            interval: data.interval.clone(),
            mode: config.run.mode,
            bar_count: indicators.len(),
            market_status: market_status.clone(),
            latest_signals: latest.clone(),
            bullish_events: scan.count(SignalDirection::Bullish),
            bearish_events: scan.count(SignalDirection::Bearish),
            conflicts: scan.conflicts.clone(),
            chart: chart_path.as_ref().map(|p| p.display().to_string()),
            next_run,
        };
        let writer = ReportWriter::new(&config.run.reports_dir);
        let report_path = writer.write_report(&report)?;
        let signals_path = writer.write_signals(&scan.events)?;

        let emails = self.plan_emails(now, market_status.as_ref(), &latest, chart_path.as_ref());
        let (emails_sent, notify_failures) = self.deliver(&emails).await?;

        info!(
            bars = report.bar_count,
            bullish = report.bullish_events,
            bearish = report.bearish_events,
            conflicts = report.conflicts.len(),
            emails_sent,
            notify_failures,
            "MonitorRuntime: run complete"
        );

        Ok(RunSummary {
            bar_count: report.bar_count,
            bullish_events: report.bullish_events,
            bearish_events: report.bearish_events,
            conflicts: report.conflicts.len(),
            latest,
            market_status,
            report_path,
            signals_path,
            chart_path,
            snapshot_paths,
            emails_sent,
            notify_failures,
            next_run,
        })
    }

    /// Emails this run should send, given the mode and the latest signals
    pub fn plan_emails(
        &self,
        now: DateTime<Utc>,
        status: Option<&MarketStatus>,
        latest: &LatestSignals,
        chart: Option<&PathBuf>,
    ) -> Vec<EmailContent> {
        let run = &self.config.run;
        if !(run.notify && self.config.email.enabled) {
            return Vec::new();
        }
        let ticker = &self.config.data.ticker;

        let mut emails = match run.mode {
            RunMode::Manual => vec![email::summary(ticker, status, latest, false)],
            RunMode::Auto if !latest.is_empty() => latest
                .events()
                .map(|event| email::signal_alert(ticker, event, status))
                .collect(),
            RunMode::Auto if now.weekday() == run.summary_weekday => {
                vec![email::summary(ticker, status, latest, true)]
            }
            RunMode::Auto => Vec::new(),
        };

        for content in &mut emails {
            content.attachment = chart.cloned();
        }
        emails
    }

    /// Email the fetch error when notifications are on. The run fails with
    /// the fetch error regardless of the delivery outcome.
    async fn report_fetch_failure(&self, now: DateTime<Utc>, error: &FetchError) {
        if !(self.config.run.notify && self.config.email.enabled) {
            return;
        }
        let content = email::fetch_failure(&self.config.data.ticker, error, now);
        if let Err(e) = self.deliver(std::slice::from_ref(&content)).await {
            warn!(error = %e, "MonitorRuntime: failed to report fetch error");
        }
    }

    /// Returns (sent, failed). A failure ends the run only in strict mode.
    async fn deliver(&self, emails: &[EmailContent]) -> Result<(usize, usize), MonitorError> {
        if emails.is_empty() {
            return Ok((0, 0));
        }
        let Some(notifier) = &self.notifier else {
            warn!(
                pending = emails.len(),
                "MonitorRuntime: notifications enabled but no notifier configured"
            );
            return Ok((0, 0));
        };

        let mut sent = 0;
        let mut failed = 0;
        for email in emails {
            match notifier.send(email).await {
                Ok(()) => sent += 1,
                Err(e) if self.config.run.fail_on_notify_error => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, subject = %email.subject, "MonitorRuntime: notification failed");
                    failed += 1;
                }
            }
        }
        Ok((sent, failed))
    }
}
