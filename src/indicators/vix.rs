use crate::models::VixBucket;

/// Bucket a VIX close. Each bucket includes its lower bound.
///
/// - `< 15`: very stable
/// - `15 ~ 20`: stable
/// - `20 ~ 30`: watch
/// - `30 ~ 40`: uneasy
/// - `>= 40`: crisis
pub fn classify_vix(close: f64) -> VixBucket {
    if close < 15.0 {
        VixBucket::VeryStable
    } else if close < 20.0 {
        VixBucket::Stable
    } else if close < 30.0 {
        VixBucket::Watch
    } else if close < 40.0 {
        VixBucket::Uneasy
    } else {
        VixBucket::Crisis
    }
}
