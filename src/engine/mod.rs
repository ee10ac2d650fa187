// Per-run analysis: fetch, compute, classify

pub mod fear_greed;
pub mod rsi;
pub mod vix;

pub use fear_greed::FearGreedAnalyzer;
pub use rsi::{evaluate_series, RsiEngine};
pub use vix::{VixAnalyzer, VIX_SYMBOL};

/// Calendar days of history requested per symbol
pub const DEFAULT_LOOKBACK_DAYS: u32 = 60;
