use crate::error::{Result, TrackerError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SYMBOLS: &[&str] = &["SPY", "QQQ", "DIA"];
pub const YAHOO_API_BASE: &str = "https://query1.finance.yahoo.com";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const FEAR_GREED_API_BASE: &str = "https://production.dataviz.cnn.io";

/// RSI period and alert bands, fixed for the whole run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TelegramSettings {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub symbols: Vec<String>,
    pub telegram: TelegramSettings,
    pub yahoo_base_url: String,
    pub fear_greed_base_url: String,
}

/// Flat key layout as it appears in the environment
#[derive(Debug, Deserialize)]
struct RawSettings {
    rsi_period: i64,
    rsi_oversold_threshold: f64,
    rsi_overbought_threshold: f64,
    symbols: Vec<String>,
    telegram_bot_token: Option<String>,
    telegram_chat_id: Option<String>,
    yahoo_base_url: String,
    telegram_base_url: String,
    fear_greed_base_url: String,
}

impl Settings {
    /// Defaults, then `rsi_tracker.toml` if present, then environment variables
    pub fn load() -> Result<Self> {
        let config = Self::builder()?
            .add_source(File::with_name("rsi_tracker").required(false))
            .add_source(
                Environment::default()
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("symbols"),
            )
            .build()?;

        Self::from_config(config)
    }

    /// Builder pre-populated with every default
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Thresholds::default();
        let symbols: Vec<String> = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();

        Ok(Config::builder()
            .set_default("rsi_period", defaults.period as i64)?
            .set_default("rsi_oversold_threshold", defaults.oversold)?
            .set_default("rsi_overbought_threshold", defaults.overbought)?
            .set_default("symbols", symbols)?
            .set_default("yahoo_base_url", YAHOO_API_BASE)?
            .set_default("telegram_base_url", TELEGRAM_API_BASE)?
            .set_default("fear_greed_base_url", FEAR_GREED_API_BASE)?)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let raw: RawSettings = config.try_deserialize()?;

        if raw.rsi_period < 2 {
            return Err(TrackerError::Config(format!(
                "RSI_PERIOD must be at least 2, got {}",
                raw.rsi_period
            )));
        }

        let thresholds = Thresholds {
            period: raw.rsi_period as usize,
            oversold: raw.rsi_oversold_threshold,
            overbought: raw.rsi_overbought_threshold,
        };

        if thresholds.oversold >= thresholds.overbought {
            tracing::warn!(
                "RSI oversold threshold ({}) is not below overbought threshold ({}); every value will land in an extreme band",
                thresholds.oversold,
                thresholds.overbought
            );
        }

        let symbols = normalize_symbols(raw.symbols);
        if symbols.is_empty() {
            return Err(TrackerError::Config("SYMBOLS is empty".to_string()));
        }

        Ok(Self {
            thresholds,
            symbols,
            telegram: TelegramSettings {
                bot_token: non_empty(raw.telegram_bot_token),
                chat_id: non_empty(raw.telegram_chat_id),
                base_url: raw.telegram_base_url,
            },
            yahoo_base_url: raw.yahoo_base_url,
            fear_greed_base_url: raw.fear_greed_base_url,
        })
    }

    /// Replace the tracked symbols (e.g. from the command line)
    pub fn with_symbols(mut self, symbols: Vec<String>) -> Result<Self> {
        let symbols = normalize_symbols(symbols);
        if symbols.is_empty() {
            return Err(TrackerError::Config("no symbols given".to_string()));
        }
        self.symbols = symbols;
        Ok(self)
    }
}

fn normalize_symbols(symbols: Vec<String>) -> Vec<String> {
    symbols
        .into_iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
