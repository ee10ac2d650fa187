use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One daily close
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices for one symbol, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub lookback_days: u32,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, lookback_days: u32, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            lookback_days,
            bars,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// RSI threshold band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RsiStatus {
    Oversold,
    Overbought,
    Normal,
}

impl RsiStatus {
    pub fn is_alert(&self) -> bool {
        !matches!(self, RsiStatus::Normal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiStatus::Oversold => "Oversold",
            RsiStatus::Overbought => "Overbought",
            RsiStatus::Normal => "Normal",
        }
    }
}

impl fmt::Display for RsiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// RSI snapshot for one symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RsiResult {
    pub symbol: String,
    pub value: f64,         // rounded to 2 decimals
    pub current_price: f64, // rounded to 2 decimals
    pub status: RsiStatus,
    pub timestamp: DateTime<Utc>,
}

/// VIX severity bucket, ordered from calm to crisis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum VixBucket {
    VeryStable,
    Stable,
    Watch,
    Uneasy,
    Crisis,
}

impl VixBucket {
    pub fn label(&self) -> &'static str {
        match self {
            VixBucket::VeryStable => "Very stable",
            VixBucket::Stable => "Stable",
            VixBucket::Watch => "Watch",
            VixBucket::Uneasy => "Uneasy",
            VixBucket::Crisis => "Crisis",
        }
    }
}

impl fmt::Display for VixBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VixResult {
    pub symbol: String,
    pub close: f64,
    pub status: VixBucket,
    pub timestamp: DateTime<Utc>,
}

/// CNN Fear & Greed band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum FearGreedLevel {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedLevel {
    pub fn label(&self) -> &'static str {
        match self {
            FearGreedLevel::ExtremeFear => "Extreme Fear",
            FearGreedLevel::Fear => "Fear",
            FearGreedLevel::Neutral => "Neutral",
            FearGreedLevel::Greed => "Greed",
            FearGreedLevel::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for FearGreedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FearGreedResult {
    pub value: u8,
    pub level: FearGreedLevel,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Round to 2 decimal places for reporting
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current time truncated to whole seconds
pub fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
