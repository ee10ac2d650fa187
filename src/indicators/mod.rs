// Technical indicators module
// RSI plus the VIX and Fear & Greed classifiers

pub mod fear_greed;
pub mod rsi;
pub mod vix;

pub use fear_greed::classify_fear_greed;
pub use rsi::{calculate_rsi, classify_status};
pub use vix::classify_vix;
