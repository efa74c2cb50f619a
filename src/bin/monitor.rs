//! Index Monitor
//!
//! Runs the fetch, indicator, signal, report and notify pipeline once for
//! the configured ticker. Meant to be triggered by an external scheduler.

use chrono::Utc;
use clap::Parser;
use dotenvy::dotenv;
use index_monitor::config::{get_environment, RunConfig, RunMode, RunOverrides};
use index_monitor::core::runtime::{MonitorRuntime, RunSummary};
use index_monitor::logging;
use index_monitor::services::market_data::MarketDataProvider;
use index_monitor::services::notifier::SmtpNotifier;
use index_monitor::services::snapshot::SnapshotProvider;
use index_monitor::services::yahoo::YahooMarketDataProvider;
use index_monitor::MonitorError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "monitor", version, about = "Technical indicator monitor for a single index")]
struct Cli {
    /// Path to the YAML configuration
    #[arg(long, default_value = "config/monitor.yaml")]
    config: PathBuf,

    /// Override the configured run mode
    #[arg(long, value_enum)]
    mode: Option<RunMode>,

    /// Send notifications
    #[arg(long)]
    notify: bool,

    /// Render the chart
    #[arg(long)]
    plot: bool,

    /// Save the fetched data snapshot
    #[arg(long)]
    save_data: bool,

    /// Replay a saved CSV snapshot instead of fetching
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            mode: self.mode,
            notify: self.notify,
            plot: self.plot,
            save_data: self.save_data,
            log_level: self.log_level.clone(),
        }
    }
}

fn fail(err: MonitorError) -> ExitCode {
    error!(error = %err, exit_code = err.exit_code(), "Run failed");
    ExitCode::from(err.exit_code())
}

fn load_config(cli: &Cli) -> Result<RunConfig, MonitorError> {
    let config = RunConfig::load(&cli.config)?.with_overrides(&cli.overrides())?;
    Ok(config)
}

fn build_provider(
    config: &RunConfig,
    snapshot: Option<&Path>,
) -> Result<Box<dyn MarketDataProvider>, MonitorError> {
    Ok(match snapshot {
        Some(path) => Box::new(SnapshotProvider::new(path)),
        None => Box::new(YahooMarketDataProvider::from_settings(&config.data)?),
    })
}

async fn run(config: RunConfig, snapshot: Option<&Path>) -> Result<RunSummary, MonitorError> {
    let provider = build_provider(&config, snapshot)?;
    let mut runtime = MonitorRuntime::new(config.clone(), provider);
    if config.email.enabled {
        let notifier = SmtpNotifier::new(config.email.clone(), config.email_password());
        runtime = runtime.with_notifier(Box::new(notifier));
    }
    runtime.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env if present
    dotenv().ok();
    let cli = Cli::parse();
    let fallback_level = cli.log_level.clone().unwrap_or_else(|| "info".to_string());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init_logging(&fallback_level, None);
            return fail(e);
        }
    };

    let log_file = match logging::open_log_file(Path::new(&config.run.logs_dir), Utc::now().date_naive()) {
        Ok((file, _)) => file,
        Err(e) => {
            let _ = logging::init_logging(&config.run.log_level, None);
            return fail(e.into());
        }
    };
    if let Err(e) = logging::init_logging(&config.run.log_level, Some(log_file)) {
        eprintln!("logging already initialized: {}", e);
    }
    config.check_email_password();

    info!(
        environment = %get_environment(),
        config = %cli.config.display(),
        "Starting index monitor"
    );

    match run(config, cli.snapshot.as_deref()).await {
        Ok(summary) => {
            info!(
                bars = summary.bar_count,
                report = %summary.report_path.display(),
                emails_sent = summary.emails_sent,
                "Index monitor finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
