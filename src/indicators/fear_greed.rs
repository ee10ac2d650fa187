use crate::models::FearGreedLevel;

/// Band a Fear & Greed reading (0-100)
pub fn classify_fear_greed(value: u8) -> FearGreedLevel {
    match value {
        0..=24 => FearGreedLevel::ExtremeFear,
        25..=44 => FearGreedLevel::Fear,
        45..=55 => FearGreedLevel::Neutral,
        56..=75 => FearGreedLevel::Greed,
        _ => FearGreedLevel::ExtremeGreed,
    }
}
