use thiserror::Error;

/// Failures of the pure indicator math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("insufficient data: need {required} prices, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid period: {0}")]
    InvalidPeriod(usize),

    #[error("non-finite price at index {index}")]
    NonFinitePrice { index: usize },
}

/// A market-data source could not deliver a usable series
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    #[error("no data returned for {0}")]
    Empty(String),
}

/// Why a single symbol was left out of a batch
#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("data unavailable: {0}")]
    Unavailable(#[from] ProviderError),

    #[error("insufficient data: need {required} prices, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("computation failed: {0}")]
    Computation(IndicatorError),
}

impl From<IndicatorError> for SymbolError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData {
                required,
                available,
            } => SymbolError::InsufficientData {
                required,
                available,
            },
            other => SymbolError::Computation(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("missing notifier credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("message rejected ({status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Errors that end a whole run
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigSource(#[from] config::ConfigError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("could not fetch RSI data for any symbol")]
    NoRsiData,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
