pub mod fear_greed;
pub mod yahoo;

pub use fear_greed::{CnnFearGreedClient, FearGreedReading, FearGreedSource};
pub use yahoo::YahooFinanceClient;

use crate::error::ProviderError;
use crate::models::PriceSeries;
use std::future::Future;

/// Source of daily closing prices
pub trait PriceSeriesProvider: Send + Sync {
    /// Closes for `symbol` over the last `lookback_days` calendar days, oldest first.
    /// An empty result is reported as `ProviderError::Empty`.
    fn fetch(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> impl Future<Output = Result<PriceSeries, ProviderError>> + Send;
}

/// Browser-like agent; both Yahoo and CNN reject the default reqwest one
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Shared by every outbound HTTP client
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;
