use anyhow::Context;
use clap::Parser;
use rsi_tracker::api::{CnnFearGreedClient, FearGreedSource, PriceSeriesProvider, YahooFinanceClient};
use rsi_tracker::notify::{Notifier, StdoutNotifier, TelegramNotifier};
use rsi_tracker::{Settings, Tracker};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// RSI / VIX market tracker with Telegram notifications
#[derive(Parser, Debug)]
#[command(name = "rsi-tracker", version, about, long_about = None)]
struct Cli {
    /// Send a test message and compute RSI for the first symbol only
    #[arg(long)]
    test: bool,

    /// Print messages to stdout instead of sending them to Telegram
    #[arg(long)]
    dry_run: bool,

    /// Symbols to track, comma-separated (overrides SYMBOLS)
    #[arg(long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("RSI tracker failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rsi_tracker=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load().context("Failed to load configuration")?;
    if let Some(symbols) = cli.symbols {
        settings = settings.with_symbols(symbols)?;
    }

    tracing::info!(
        "RSI tracker starting (period {}, oversold≤{}, overbought≥{})",
        settings.thresholds.period,
        settings.thresholds.oversold,
        settings.thresholds.overbought
    );

    let provider = YahooFinanceClient::with_base_url(&settings.yahoo_base_url)
        .context("Failed to build Yahoo Finance client")?;
    let fear_greed = CnnFearGreedClient::with_base_url(&settings.fear_greed_base_url)
        .context("Failed to build Fear & Greed client")?;

    if cli.dry_run {
        return execute(cli.test, &settings, &provider, &fear_greed, &StdoutNotifier).await;
    }

    let notifier = TelegramNotifier::from_settings(&settings.telegram)
        .context("Failed to set up Telegram notifier")?;
    execute(cli.test, &settings, &provider, &fear_greed, &notifier).await
}

async fn execute<P, F, N>(
    test_mode: bool,
    settings: &Settings,
    provider: &P,
    fear_greed: &F,
    notifier: &N,
) -> anyhow::Result<()>
where
    P: PriceSeriesProvider,
    F: FearGreedSource,
    N: Notifier,
{
    let tracker = Tracker::new(settings, provider, fear_greed, notifier);

    if test_mode {
        tracker.run_self_test().await?;
        return Ok(());
    }

    match tracker.run_report().await {
        Ok(outcome) => {
            tracing::info!(
                "RSI tracker finished: {} symbols, {} alerts",
                outcome.results.len(),
                outcome.alert_count
            );
            Ok(())
        }
        Err(e) => {
            tracker.report_failure(&e).await;
            Err(e.into())
        }
    }
}
