use super::DEFAULT_LOOKBACK_DAYS;
use crate::api::PriceSeriesProvider;
use crate::error::ProviderError;
use crate::indicators::classify_vix;
use crate::models::{now_seconds, round2, VixResult};

pub const VIX_SYMBOL: &str = "^VIX";

/// Latest VIX close and its severity bucket
pub struct VixAnalyzer<'a, P> {
    provider: &'a P,
}

impl<'a, P: PriceSeriesProvider> VixAnalyzer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    pub async fn get_latest_snapshot(&self) -> Result<VixResult, ProviderError> {
        let series = self
            .provider
            .fetch(VIX_SYMBOL, DEFAULT_LOOKBACK_DAYS)
            .await?;
        let close = series
            .last_close()
            .ok_or_else(|| ProviderError::Empty(VIX_SYMBOL.to_string()))?;

        if close < 0.0 {
            tracing::warn!("Negative VIX close {}; bucketing as very stable", close);
        }

        let close = round2(close);
        let status = classify_vix(close);

        tracing::info!("VIX latest close: {} ({})", close, status);

        Ok(VixResult {
            symbol: VIX_SYMBOL.to_string(),
            close,
            status,
            timestamp: now_seconds(),
        })
    }
}
