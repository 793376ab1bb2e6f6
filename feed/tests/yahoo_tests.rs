//! Integration tests for the Yahoo chart provider against a mock HTTP server

use chrono::{TimeZone, Utc};
use sig_feed::providers::{MarketDataProvider, ProviderConfig, YahooChartProvider};
use sig_feed::{
    BarInterval, BarRequest, ExchangeId, FeedError, InstrumentId, ProviderId, RawTimestamp,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Three 5-minute rows starting 2024-01-02 09:15 IST, with one null close
const CHART_BODY: &str = r#"{
    "chart": {
        "result": [{
            "meta": {"symbol": "NIFTYTEST", "regularMarketPrice": 21750.25},
            "timestamp": [1704167100, 1704167400, 1704167700],
            "indicators": {
                "quote": [{
                    "open":   [21730.0, 21744.0, 21748.5],
                    "high":   [21745.0, 21752.0, 21760.0],
                    "low":    [21725.5, 21740.0, 21745.0],
                    "close":  [21742.5, null, 21750.25],
                    "volume": [null, null, null]
                }]
            }
        }],
        "error": null
    }
}"#;

const ERROR_BODY: &str = r#"{
    "chart": {
        "result": null,
        "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
    }
}"#;

const EMPTY_BODY: &str = r#"{
    "chart": {
        "result": [{"timestamp": [], "indicators": {"quote": []}}],
        "error": null
    }
}"#;

fn test_provider(server_uri: &str) -> YahooChartProvider {
    let config =
        ProviderConfig::new(ProviderId::new("yahoo-test"), server_uri).with_timeout_secs(5);
    YahooChartProvider::new(config).unwrap()
}

fn test_request(symbol: &str) -> BarRequest {
    BarRequest::new(
        InstrumentId::new(symbol),
        ExchangeId::new("NSE"),
        BarInterval::Min5,
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn fetch_bars_parses_chart_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NIFTYTEST"))
        .and(query_param("interval", "5m"))
        .and(query_param("includePrePost", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(CHART_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let mut provider = test_provider(&server.uri());
    let bars = provider
        .fetch_bars(&test_request("NIFTYTEST"))
        .await
        .unwrap();

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].timestamp, RawTimestamp::Epoch(1704167100));
    assert_eq!(bars[0].open, Some(21730.0));
    assert_eq!(bars[0].close, Some(21742.5));
    // Null slots are carried through untouched
    assert_eq!(bars[1].close, None);
    assert_eq!(bars[2].volume, None);
}

#[tokio::test]
async fn fetch_bars_maps_chart_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(ERROR_BODY, "application/json"))
        .mount(&server)
        .await;

    let mut provider = test_provider(&server.uri());
    let err = provider
        .fetch_bars(&test_request("GONE"))
        .await
        .unwrap_err();

    match err {
        FeedError::ProviderError { code, message, .. } => {
            assert_eq!(code.as_deref(), Some("Not Found"));
            assert!(message.contains("No data found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn fetch_bars_maps_plain_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NIFTYTEST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let mut provider = test_provider(&server.uri());
    let err = provider
        .fetch_bars(&test_request("NIFTYTEST"))
        .await
        .unwrap_err();

    match err {
        FeedError::ProviderError { code, .. } => assert_eq!(code.as_deref(), Some("500")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn fetch_bars_empty_result_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NIFTYTEST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(EMPTY_BODY, "application/json"))
        .mount(&server)
        .await;

    let mut provider = test_provider(&server.uri());
    let bars = provider
        .fetch_bars(&test_request("NIFTYTEST"))
        .await
        .unwrap();

    assert!(bars.is_empty());
}

#[tokio::test]
async fn health_check_reports_reachability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut provider = test_provider(&uri);
    assert!(provider.health_check().await.unwrap());

    // Once the mock server is gone health_check reports unhealthy, not an error
    drop(server);
    assert!(!provider.health_check().await.unwrap());
}
