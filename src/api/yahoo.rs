use super::{PriceSeriesProvider, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::config::YAHOO_API_BASE;
use crate::error::ProviderError;
use crate::models::{PriceBar, PriceSeries};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "Yahoo Finance";

/// Client for the Yahoo Finance chart API (daily bars)
#[derive(Clone)]
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooFinanceClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(YAHOO_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch daily closes between two instants
    pub async fn fetch_range(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            encode_symbol(symbol)
        );

        tracing::debug!("GET {} ({} ~ {})", url, start.timestamp(), end.timestamp());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let chart: ChartResponse = response.json().await.map_err(|e| ProviderError::Parse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        parse_chart(chart)
    }
}

impl PriceSeriesProvider for YahooFinanceClient {
    async fn fetch(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries, ProviderError> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(lookback_days));

        tracing::info!(
            "{} data fetch started ({} ~ {})",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let bars = self.fetch_range(symbol, start, end).await?;
        if bars.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()));
        }

        tracing::info!("{} data fetched: {} records", symbol, bars.len());

        Ok(PriceSeries::new(symbol, lookback_days, bars))
    }
}

/// `^VIX` -> `%5EVIX`
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

fn parse_chart(chart: ChartResponse) -> Result<Vec<PriceBar>, ProviderError> {
    if let Some(err) = chart.chart.error {
        return Err(ProviderError::Parse {
            provider: PROVIDER,
            message: format!("{}: {}", err.code, err.description),
        });
    }

    let Some(result) = chart.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    // Closes are null on sessions without a print (e.g. the still-open day)
    let bars = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some(PriceBar { date, close })
        })
        .collect();

    Ok(bars)
}
