use crate::error::IndicatorError;
use crate::models::RsiStatus;

/// Calculate Relative Strength Index (RSI) with Wilder's smoothing
///
/// The first `period` gains and losses seed the averages with a simple
/// mean; every later change is folded in with weight `1 / period`,
/// oldest to newest.
///
/// Values:
/// - RSI >= overbought: Overbought
/// - RSI <= oversold: Oversold
///
pub fn calculate_rsi(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }

    if prices.len() < period + 1 {
        return Err(IndicatorError::InsufficientData {
            required: period + 1,
            available: prices.len(),
        });
    }

    if let Some(index) = prices.iter().position(|p| !p.is_finite()) {
        return Err(IndicatorError::NonFinitePrice { index });
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    // Calculate price changes
    for window in prices.windows(2) {
        let change = window[1] - window[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let n = period as f64;
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / n;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / n;

    for (gain, loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
    }

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Ok(rsi)
}

/// Map an RSI value onto its threshold band (both bounds inclusive)
pub fn classify_status(rsi: f64, oversold: f64, overbought: f64) -> RsiStatus {
    if rsi <= oversold {
        RsiStatus::Oversold
    } else if rsi >= overbought {
        RsiStatus::Overbought
    } else {
        RsiStatus::Normal
    }
}
