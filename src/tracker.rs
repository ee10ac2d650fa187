use crate::api::{FearGreedSource, PriceSeriesProvider};
use crate::config::Settings;
use crate::engine::{FearGreedAnalyzer, RsiEngine, VixAnalyzer};
use crate::error::{Result, TrackerError};
use crate::models::{FearGreedResult, RsiResult, VixResult};
use crate::notify::Notifier;
use crate::report;

/// What a normal run computed and sent
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub results: Vec<RsiResult>,
    pub alert_count: usize,
    pub vix: Option<VixResult>,
    pub fear_greed: Option<FearGreedResult>,
    pub message: String,
}

/// One invocation: fetch, compute, format, notify
pub struct Tracker<'a, P, F, N> {
    settings: &'a Settings,
    provider: &'a P,
    fear_greed: &'a F,
    notifier: &'a N,
}

impl<'a, P, F, N> Tracker<'a, P, F, N>
where
    P: PriceSeriesProvider,
    F: FearGreedSource,
    N: Notifier,
{
    pub fn new(settings: &'a Settings, provider: &'a P, fear_greed: &'a F, notifier: &'a N) -> Self {
        Self {
            settings,
            provider,
            fear_greed,
            notifier,
        }
    }

    /// Normal mode. An empty RSI batch is a hard failure.
    pub async fn run_report(&self) -> Result<ReportOutcome> {
        tracing::info!("Tracked symbols: {:?}", self.settings.symbols);

        let engine = RsiEngine::new(self.provider, self.settings.thresholds);
        let results = engine.compute_for_symbols(self.settings.symbols.as_slice()).await;
        if results.is_empty() {
            return Err(TrackerError::NoRsiData);
        }
        tracing::info!("RSI computed for {} symbols", results.len());

        let vix = match VixAnalyzer::new(self.provider).get_latest_snapshot().await {
            Ok(vix) => Some(vix),
            Err(e) => {
                tracing::error!("VIX snapshot unavailable: {}", e);
                None
            }
        };

        let fear_greed = match FearGreedAnalyzer::new(self.fear_greed).get_latest().await {
            Ok(fgi) => Some(fgi),
            Err(e) => {
                tracing::error!("Fear & Greed Index unavailable: {}", e);
                None
            }
        };

        let body = report::format_report(
            &results,
            &self.settings.thresholds,
            vix.as_ref(),
            fear_greed.as_ref(),
        );

        let alerts: Vec<&RsiResult> = results.iter().filter(|r| r.status.is_alert()).collect();
        let alert_count = alerts.len();

        let message = if alerts.is_empty() {
            body
        } else {
            report::format_alert(&alerts, &body)
        };

        self.notifier.send_message(&message).await?;

        if alert_count > 0 {
            tracing::info!("RSI alert sent: {} symbols at a threshold", alert_count);
        } else {
            tracing::info!("RSI report sent: all symbols in the normal band");
        }

        for result in &results {
            tracing::info!(
                "{}: RSI={}, price=${}, status={}",
                result.symbol,
                result.value,
                result.current_price,
                result.status
            );
        }

        Ok(ReportOutcome {
            results,
            alert_count,
            vix,
            fear_greed,
            message,
        })
    }

    /// Test mode: check delivery, then run RSI for the first symbol only
    pub async fn run_self_test(&self) -> Result<Option<RsiResult>> {
        tracing::info!("RSI tracker self-test started");

        self.notifier
            .send_test_message("🧪 <b>RSI tracker test</b>\n\nTest message delivered.")
            .await?;
        tracing::info!("Test message sent");

        let symbols: Vec<&str> = self
            .settings
            .symbols
            .iter()
            .take(1)
            .map(String::as_str)
            .collect();

        let engine = RsiEngine::new(self.provider, self.settings.thresholds);
        let results = engine.compute_for_symbols(symbols.as_slice()).await;

        if results.is_empty() {
            tracing::error!("RSI self-test failed for {:?}", symbols);
            return Ok(None);
        }

        let message = report::format_rsi_message(&results, &self.settings.thresholds);
        self.notifier
            .send_test_message(&format!("📊 Test result:\n\n{}", message))
            .await?;
        tracing::info!("RSI self-test completed");

        Ok(results.into_iter().next())
    }

    /// Best-effort failure notice; delivery errors are only logged
    pub async fn report_failure(&self, error: &TrackerError) {
        if let Err(e) = self
            .notifier
            .send_message(&report::format_error(&error.to_string()))
            .await
        {
            tracing::error!("Failed to deliver error notification: {}", e);
        }
    }
}
