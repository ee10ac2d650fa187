//! Telegram (HTML) message rendering

use crate::config::Thresholds;
use crate::models::{FearGreedLevel, FearGreedResult, RsiResult, RsiStatus, VixBucket, VixResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Escape text from providers or errors for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn status_emoji(status: RsiStatus) -> &'static str {
    match status {
        RsiStatus::Oversold => "🔴",
        RsiStatus::Overbought => "🟢",
        RsiStatus::Normal => "🔵",
    }
}

fn vix_emoji(bucket: VixBucket) -> &'static str {
    match bucket {
        VixBucket::VeryStable | VixBucket::Stable => "🟢",
        VixBucket::Watch => "🟡",
        VixBucket::Uneasy => "🟠",
        VixBucket::Crisis => "🔴",
    }
}

fn fear_greed_emoji(level: FearGreedLevel) -> &'static str {
    match level {
        FearGreedLevel::ExtremeFear => "😱",
        FearGreedLevel::Fear => "😟",
        FearGreedLevel::Neutral => "😐",
        FearGreedLevel::Greed => "😏",
        FearGreedLevel::ExtremeGreed => "🤑",
    }
}

/// Routine RSI overview for all symbols
pub fn format_rsi_message(results: &[RsiResult], thresholds: &Thresholds) -> String {
    let Some(first) = results.first() else {
        return "Could not fetch RSI data.".to_string();
    };

    let mut message = String::from("📊 <b>US Index RSI Overview</b>\n\n");

    for result in results {
        message.push_str(&format!(
            "{} <b>{}</b>\n   RSI: {}\n   Price: ${}\n   Status: {}\n\n",
            status_emoji(result.status),
            escape_html(&result.symbol),
            result.value,
            result.current_price,
            result.status
        ));
    }

    message.push_str(&format!(
        "⏰ Updated: {}\n📈 RSI bands: oversold≤{}, overbought≥{}",
        first.timestamp.format(TIMESTAMP_FORMAT),
        thresholds.oversold,
        thresholds.overbought
    ));

    message
}

/// Alert header for symbols in an extreme band, followed by the full report
pub fn format_alert(alerts: &[&RsiResult], body: &str) -> String {
    let mut message = String::from("🚨 <b>RSI Alert</b>\n\n");

    for result in alerts {
        message.push_str(&format!(
            "{} {}: RSI {} ({})\n",
            status_emoji(result.status),
            escape_html(&result.symbol),
            result.value,
            result.status
        ));
    }

    message.push('\n');
    message.push_str(body);
    message
}

pub fn format_vix_section(vix: Option<&VixResult>) -> String {
    match vix {
        None => "🌪 <b>VIX Volatility</b>\n   No data available.\n\n".to_string(),
        Some(vix) => format!(
            "🌪 <b>VIX Volatility</b>\n   VIX close: {}\n   Status: {} {}\n\n",
            vix.close,
            vix_emoji(vix.status),
            vix.status
        ),
    }
}

pub fn format_fear_greed_section(fgi: Option<&FearGreedResult>) -> String {
    match fgi {
        None => "🧭 <b>Fear &amp; Greed Index</b>\n   No data available.\n\n".to_string(),
        Some(fgi) => format!(
            "🧭 <b>Fear &amp; Greed Index</b>\n   Value: {}\n   Status: {} {}\n   Updated: {}\n\n",
            fgi.value,
            fear_greed_emoji(fgi.level),
            escape_html(&fgi.description),
            fgi.timestamp.format(TIMESTAMP_FORMAT)
        ),
    }
}

/// Full report: market context sections followed by the RSI overview
pub fn format_report(
    results: &[RsiResult],
    thresholds: &Thresholds,
    vix: Option<&VixResult>,
    fgi: Option<&FearGreedResult>,
) -> String {
    format!(
        "{}{}{}",
        format_vix_section(vix),
        format_fear_greed_section(fgi),
        format_rsi_message(results, thresholds)
    )
}

pub fn format_error(error: &str) -> String {
    format!("❌ RSI tracker error\n\n{}", escape_html(error))
}
