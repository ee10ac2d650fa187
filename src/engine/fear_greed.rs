use crate::api::FearGreedSource;
use crate::error::ProviderError;
use crate::indicators::classify_fear_greed;
use crate::models::{now_seconds, FearGreedResult};

/// Latest CNN Fear & Greed reading, banded
pub struct FearGreedAnalyzer<'a, S> {
    source: &'a S,
}

impl<'a, S: FearGreedSource> FearGreedAnalyzer<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn get_latest(&self) -> Result<FearGreedResult, ProviderError> {
        let reading = self.source.fetch_latest().await?;

        let value = reading.score.round().clamp(0.0, 100.0) as u8;
        let level = classify_fear_greed(value);
        let description = reading
            .rating
            .as_deref()
            .map(title_case)
            .unwrap_or_else(|| level.label().to_string());

        let result = FearGreedResult {
            value,
            level,
            description,
            timestamp: reading.last_update.unwrap_or_else(now_seconds),
        };

        tracing::info!(
            "Fear & Greed Index: {} ({}), updated {}",
            result.value,
            result.description,
            result.timestamp.format("%Y-%m-%d %H:%M:%S")
        );

        Ok(result)
    }
}

/// "extreme greed" -> "Extreme Greed"
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
