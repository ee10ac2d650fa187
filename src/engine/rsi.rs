use super::DEFAULT_LOOKBACK_DAYS;
use crate::api::PriceSeriesProvider;
use crate::config::Thresholds;
use crate::error::{ProviderError, SymbolError};
use crate::indicators::{calculate_rsi, classify_status};
use crate::models::{now_seconds, round2, PriceSeries, RsiResult};

/// Batch RSI evaluation over a price provider
pub struct RsiEngine<'a, P> {
    provider: &'a P,
    thresholds: Thresholds,
    lookback_days: u32,
}

impl<'a, P: PriceSeriesProvider> RsiEngine<'a, P> {
    pub fn new(provider: &'a P, thresholds: Thresholds) -> Self {
        Self {
            provider,
            thresholds,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Fetch and evaluate one symbol
    pub async fn compute_for_symbol(&self, symbol: &str) -> Result<RsiResult, SymbolError> {
        let series = self.provider.fetch(symbol, self.lookback_days).await?;
        if series.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()).into());
        }

        let result = evaluate_series(&series, &self.thresholds)?;

        tracing::info!(
            "{} RSI computed: {:.2} ({})",
            result.symbol,
            result.value,
            result.status
        );

        Ok(result)
    }

    /// Evaluate symbols in order, leaving out any that fail
    pub async fn compute_for_symbols<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<RsiResult> {
        let mut results = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let symbol = symbol.as_ref();
            match self.compute_for_symbol(symbol).await {
                Ok(result) => results.push(result),
                Err(SymbolError::InsufficientData {
                    required,
                    available,
                }) => {
                    tracing::warn!(
                        "Not enough data for {} RSI: need {}, got {}",
                        symbol,
                        required,
                        available
                    );
                }
                Err(e) => {
                    tracing::error!("{} RSI skipped: {}", symbol, e);
                }
            }
        }

        results
    }
}

/// RSI record for a fetched series. Status is classified before rounding.
pub fn evaluate_series(
    series: &PriceSeries,
    thresholds: &Thresholds,
) -> Result<RsiResult, SymbolError> {
    let closes = series.closes();
    let current_price = closes
        .last()
        .copied()
        .ok_or_else(|| ProviderError::Empty(series.symbol.clone()))?;

    let rsi = calculate_rsi(&closes, thresholds.period)?;
    let status = classify_status(rsi, thresholds.oversold, thresholds.overbought);

    Ok(RsiResult {
        symbol: series.symbol.clone(),
        value: round2(rsi),
        current_price: round2(current_price),
        status,
        timestamp: now_seconds(),
    })
}
