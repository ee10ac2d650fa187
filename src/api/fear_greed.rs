use super::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::config::FEAR_GREED_API_BASE;
use crate::error::ProviderError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

const PROVIDER: &str = "CNN Fear & Greed";

/// Raw index reading as published
#[derive(Debug, Clone, PartialEq)]
pub struct FearGreedReading {
    pub score: f64,
    pub rating: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
}

/// Source of the latest Fear & Greed reading
pub trait FearGreedSource: Send + Sync {
    fn fetch_latest(&self) -> impl Future<Output = Result<FearGreedReading, ProviderError>> + Send;
}

/// Client for CNN's Fear & Greed graph data endpoint
#[derive(Clone)]
pub struct CnnFearGreedClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    fear_and_greed: IndexNow,
}

#[derive(Debug, Deserialize)]
struct IndexNow {
    score: f64,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl CnnFearGreedClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(FEAR_GREED_API_BASE)
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
}

impl FearGreedSource for CnnFearGreedClient {
    async fn fetch_latest(&self) -> Result<FearGreedReading, ProviderError> {
        let url = format!("{}/index/fearandgreed/graphdata", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

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

        let data: GraphData = response.json().await.map_err(|e| ProviderError::Parse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        Ok(into_reading(data.fear_and_greed))
    }
}

fn into_reading(raw: IndexNow) -> FearGreedReading {
    let last_update = raw
        .timestamp
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Utc));

    FearGreedReading {
        score: raw.score,
        rating: raw.rating.filter(|r| !r.trim().is_empty()),
        last_update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_reading() {
        let data: GraphData = serde_json::from_str(
            r#"{"fear_and_greed":{"score":41.6,"rating":"fear","timestamp":"2024-05-03T23:59:55+00:00",
                "previous_close":40.1},"market_momentum_sp500":{}}"#,
        )
        .unwrap();

        let reading = into_reading(data.fear_and_greed);
        assert_eq!(reading.score, 41.6);
        assert_eq!(reading.rating.as_deref(), Some("fear"));
        assert_eq!(
            reading.last_update.unwrap().to_rfc3339(),
            "2024-05-03T23:59:55+00:00"
        );
    }

    #[test]
    fn test_into_reading_tolerates_missing_fields() {
        let data: GraphData =
            serde_json::from_str(r#"{"fear_and_greed":{"score":80,"rating":"","timestamp":"yesterday"}}"#)
                .unwrap();

        let reading = into_reading(data.fear_and_greed);
        assert_eq!(reading.score, 80.0);
        assert!(reading.rating.is_none());
        assert!(reading.last_update.is_none());
    }
}
