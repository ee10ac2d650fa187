use mockito::{Matcher, Mock, ServerGuard};
use rsi_tracker::api::{CnnFearGreedClient, YahooFinanceClient};
use rsi_tracker::notify::TelegramNotifier;
use rsi_tracker::{FearGreedLevel, RsiStatus, Settings, TrackerError, Tracker, VixBucket};
use serde_json::json;

fn chart_body(closes: &[f64]) -> String {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| 1_704_205_800 + i * 86_400)
        .collect();

    json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
    .to_string()
}

async fn mock_chart(server: &mut ServerGuard, path_symbol: &str, closes: &[f64]) -> Mock {
    server
        .mock("GET", format!("/v8/finance/chart/{}", path_symbol).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chart_body(closes))
        .create_async()
        .await
}

async fn mock_fear_greed(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/index/fearandgreed/graphdata")
        .with_status(200)
        .with_body(r#"{"fear_and_greed":{"score":22.3,"rating":"extreme fear","timestamp":"2024-08-05T14:00:00+00:00"}}"#)
        .create_async()
        .await
}

fn settings(symbols: &[&str]) -> Settings {
    let config = Settings::builder()
        .unwrap()
        .set_override(
            "symbols",
            symbols.iter().map(|s| s.to_string()).collect::<Vec<String>>(),
        )
        .unwrap()
        .build()
        .unwrap();
    Settings::from_config(config).unwrap()
}

fn rising(n: usize) -> Vec<f64> {
    (0..n).map(|i| 400.0 + i as f64 * 0.5).collect()
}

fn falling(n: usize) -> Vec<f64> {
    (0..n).map(|i| 400.0 - i as f64 * 0.5).collect()
}

fn alternating(n: usize) -> Vec<f64> {
    (0..n).map(|i| if i % 2 == 0 { 380.0 } else { 381.0 }).collect()
}

#[tokio::test]
async fn test_report_with_alerts() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut market = mockito::Server::new_async().await;
    let _spy = mock_chart(&mut market, "SPY", &rising(41)).await;
    let _qqq = mock_chart(&mut market, "QQQ", &alternating(15)).await;
    let _dia = mock_chart(&mut market, "DIA", &falling(41)).await;
    let _vix = mock_chart(&mut market, "%5EVIX", &[18.0, 21.3, 22.5]).await;
    let _fgi = mock_fear_greed(&mut market).await;

    let mut telegram = mockito::Server::new_async().await;
    let send = telegram
        .mock("POST", "/bottoken/sendMessage")
        .match_body(Matcher::Regex("RSI Alert".into()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let settings = settings(&["SPY", "QQQ", "DIA"]);
    let provider = YahooFinanceClient::with_base_url(market.url()).unwrap();
    let fear_greed = CnnFearGreedClient::with_base_url(market.url()).unwrap();
    let notifier = TelegramNotifier::new(telegram.url(), "token", "42").unwrap();

    let tracker = Tracker::new(&settings, &provider, &fear_greed, &notifier);
    let outcome = tracker.run_report().await.unwrap();

    let statuses: Vec<(&str, RsiStatus)> = outcome
        .results
        .iter()
        .map(|r| (r.symbol.as_str(), r.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("SPY", RsiStatus::Overbought),
            ("QQQ", RsiStatus::Normal),
            ("DIA", RsiStatus::Oversold),
        ]
    );
    assert_eq!(outcome.results[0].value, 100.0);
    assert_eq!(outcome.results[1].value, 50.0);
    assert_eq!(outcome.results[2].value, 0.0);
    assert_eq!(outcome.results[0].current_price, 420.0);
    assert_eq!(outcome.alert_count, 2);

    let vix = outcome.vix.as_ref().unwrap();
    assert_eq!(vix.close, 22.5);
    assert_eq!(vix.status, VixBucket::Watch);

    let fgi = outcome.fear_greed.as_ref().unwrap();
    assert_eq!(fgi.value, 22);
    assert_eq!(fgi.level, FearGreedLevel::ExtremeFear);
    assert_eq!(fgi.description, "Extreme Fear");

    assert!(outcome.message.starts_with("🚨 <b>RSI Alert</b>"));
    assert!(outcome.message.contains("🔴 DIA: RSI 0 (Oversold)"));
    assert!(outcome.message.contains("🟢 SPY: RSI 100 (Overbought)"));

    send.assert_async().await;
}

#[tokio::test]
async fn test_report_skips_failing_symbols_and_sections() {
    let mut market = mockito::Server::new_async().await;
    let _spy = mock_chart(&mut market, "SPY", &alternating(30)).await;
    // 10 closes cannot seed a 14-period RSI
    let _qqq = mock_chart(&mut market, "QQQ", &rising(10)).await;
    let _dia = market
        .mock("GET", "/v8/finance/chart/DIA")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let _vix = market
        .mock("GET", "/v8/finance/chart/%5EVIX")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    let _fgi = market
        .mock("GET", "/index/fearandgreed/graphdata")
        .with_status(418)
        .create_async()
        .await;

    let mut telegram = mockito::Server::new_async().await;
    let send = telegram
        .mock("POST", "/bottoken/sendMessage")
        .match_body(Matcher::Regex("US Index RSI Overview".into()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let settings = settings(&["SPY", "QQQ", "DIA"]);
    let provider = YahooFinanceClient::with_base_url(market.url()).unwrap();
    let fear_greed = CnnFearGreedClient::with_base_url(market.url()).unwrap();
    let notifier = TelegramNotifier::new(telegram.url(), "token", "42").unwrap();

    let tracker = Tracker::new(&settings, &provider, &fear_greed, &notifier);
    let outcome = tracker.run_report().await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].symbol, "SPY");
    assert_eq!(outcome.alert_count, 0);
    assert!(outcome.vix.is_none());
    assert!(outcome.fear_greed.is_none());
    assert!(!outcome.message.contains("RSI Alert"));
    assert!(outcome.message.contains("No data available."));

    send.assert_async().await;
}

#[tokio::test]
async fn test_report_without_any_rsi_fails_and_notifies() {
    let mut market = mockito::Server::new_async().await;
    let _all = market
        .mock("GET", Matcher::Regex("^/v8/finance/chart/".into()))
        .with_status(404)
        .create_async()
        .await;

    let mut telegram = mockito::Server::new_async().await;
    let alert = telegram
        .mock("POST", "/bottoken/sendMessage")
        .match_body(Matcher::Regex("RSI tracker error".into()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let settings = settings(&["SPY", "QQQ"]);
    let provider = YahooFinanceClient::with_base_url(market.url()).unwrap();
    let fear_greed = CnnFearGreedClient::with_base_url(market.url()).unwrap();
    let notifier = TelegramNotifier::new(telegram.url(), "token", "42").unwrap();

    let tracker = Tracker::new(&settings, &provider, &fear_greed, &notifier);
    let err = tracker.run_report().await.unwrap_err();
    assert!(matches!(err, TrackerError::NoRsiData));

    tracker.report_failure(&err).await;
    alert.assert_async().await;
}

#[tokio::test]
async fn test_self_test_uses_first_symbol_only() {
    let mut market = mockito::Server::new_async().await;
    let spy = mock_chart(&mut market, "SPY", &rising(30)).await;
    let qqq = market
        .mock("GET", "/v8/finance/chart/QQQ")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut telegram = mockito::Server::new_async().await;
    let sends = telegram
        .mock("POST", "/bottoken/sendMessage")
        .match_body(Matcher::PartialJson(json!({ "disable_notification": true })))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(2)
        .create_async()
        .await;

    let settings = settings(&["SPY", "QQQ"]);
    let provider = YahooFinanceClient::with_base_url(market.url()).unwrap();
    let fear_greed = CnnFearGreedClient::with_base_url(market.url()).unwrap();
    let notifier = TelegramNotifier::new(telegram.url(), "token", "42").unwrap();

    let tracker = Tracker::new(&settings, &provider, &fear_greed, &notifier);
    let result = tracker.run_self_test().await.unwrap().unwrap();

    assert_eq!(result.symbol, "SPY");
    assert_eq!(result.status, RsiStatus::Overbought);

    spy.assert_async().await;
    qqq.assert_async().await;
    sends.assert_async().await;
}

#[tokio::test]
#[ignore] // Requires network
async fn test_live_rsi_for_spy() {
    let settings = settings(&["SPY"]);
    let provider = YahooFinanceClient::new().unwrap();
    let engine = rsi_tracker::RsiEngine::new(&provider, settings.thresholds);

    let results = engine.compute_for_symbols(&["SPY"]).await;
    assert_eq!(results.len(), 1);
    assert!((0.0..=100.0).contains(&results[0].value));
}
