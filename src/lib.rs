// Core modules
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod models;
pub mod notify;
pub mod report;
pub mod tracker;

// Re-export commonly used types
pub use api::*;
pub use crate::config::{Settings, Thresholds};
pub use engine::{FearGreedAnalyzer, RsiEngine, VixAnalyzer};
pub use error::{IndicatorError, NotifyError, ProviderError, Result, SymbolError, TrackerError};
pub use models::*;
pub use notify::Notifier;
pub use tracker::{ReportOutcome, Tracker};
