//! REST boundary tests, driving the router in-process.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use best_execution::api::rest::{AppState, create_router};
use best_execution::application::services::{BestExecutionService, FanOutMode};
use best_execution::config::SourcesConfig;
use best_execution::infrastructure::sources::{self, CancelHandle};
use common::{MockSource, service};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router_with(svc: BestExecutionService) -> Router {
    let state = AppState::new(
        Arc::new(svc),
        Duration::from_secs(5),
        Arc::new(CancelHandle::new()),
    );
    create_router(Arc::new(state))
}

fn router(coinbase: MockSource, kraken: MockSource) -> Router {
    router_with(service(vec![coinbase, kraken], FanOutMode::Concurrent))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_quote(body: &Value, coin: &str, amount: f64, usd_amount: f64, exchange: &[&str]) {
    assert_eq!(body["coin"], coin);
    assert_eq!(body["amount"].as_f64(), Some(amount));
    assert_eq!(body["usdAmount"].as_f64(), Some(usd_amount));
    assert_eq!(body["exchange"], json!(exchange));
}

#[tokio::test]
async fn buy_best_price_on_coinbase() {
    for coin in ["BTC", "ETH"] {
        let (status, body) = get(
            router(
                MockSource::quoting("coinbase", 9_900.0, 9_900.0),
                MockSource::quoting("kraken", 10_000.0, 10_000.0),
            ),
            &format!("/buy?amount=1&symbol={coin}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_quote(&body, coin, 1.0, 9_900.0, &["coinbase"]);
    }
}

#[tokio::test]
async fn buy_best_price_on_kraken() {
    let (status, body) = get(
        router(
            MockSource::quoting("coinbase", 10_000.0, 10_000.0),
            MockSource::quoting("kraken", 9_900.0, 9_900.0),
        ),
        "/buy?amount=1&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 1.0, 9_900.0, &["kraken"]);
}

#[tokio::test]
async fn buy_same_price_on_both() {
    let (status, body) = get(
        router(
            MockSource::quoting("coinbase", 10_000.0, 10_000.0),
            MockSource::quoting("kraken", 10_000.0, 10_000.0),
        ),
        "/buy?amount=1&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 1.0, 10_000.0, &["coinbase", "kraken"]);
}

#[tokio::test]
async fn buy_fractional_amount() {
    let (status, body) = get(
        router(
            MockSource::quoting("coinbase", 10_000.0, 10_000.0),
            MockSource::quoting("kraken", 9_900.0, 9_900.0),
        ),
        "/buy?amount=0.5&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 0.5, 4_950.0, &["kraken"]);
}

#[tokio::test]
async fn sell_best_price_on_kraken() {
    let (status, body) = get(
        router(
            MockSource::quoting("coinbase", 9_950.0, 9_900.0),
            MockSource::quoting("kraken", 10_050.0, 10_000.0),
        ),
        "/sell?amount=0.5&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 0.5, 5_000.0, &["kraken"]);
}

#[tokio::test]
async fn invalid_amount_is_400() {
    for uri in [
        "/buy?amount=junk&symbol=BTC",
        "/buy?amount=&symbol=BTC",
        "/buy?symbol=BTC",
        "/sell?amount=0&symbol=BTC",
        "/sell?amount=-2&symbol=BTC",
        "/buy?amount=1&amount=2&symbol=BTC",
        "/buy?amount=%FF&symbol=BTC",
    ] {
        let (status, body) = get(
            router(
                MockSource::quoting("coinbase", 10_000.0, 10_000.0),
                MockSource::quoting("kraken", 9_900.0, 9_900.0),
            ),
            uri,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": "invalid amount"}), "{uri}");
    }
}

#[tokio::test]
async fn missing_symbol_is_400() {
    for uri in ["/buy?amount=1", "/sell?amount=1&symbol="] {
        let (status, body) = get(
            router(
                MockSource::quoting("coinbase", 10_000.0, 10_000.0),
                MockSource::quoting("kraken", 9_900.0, 9_900.0),
            ),
            uri,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": "invalid symbol"}), "{uri}");
    }
}

#[tokio::test]
async fn one_source_failing_is_skipped() {
    let (status, body) = get(
        router(
            MockSource::failing("coinbase"),
            MockSource::quoting("kraken", 9_900.0, 9_900.0),
        ),
        "/buy?amount=1&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 1.0, 9_900.0, &["kraken"]);
}

#[tokio::test]
async fn all_sources_failing_is_500() {
    let (status, body) = get(
        router(MockSource::failing("coinbase"), MockSource::failing("kraken")),
        "/buy?amount=1&symbol=BTC",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "no price available for BTC"}));
}

#[tokio::test]
async fn health_lists_sources() {
    let (status, body) = get(
        router(
            MockSource::quoting("coinbase", 1.0, 1.0),
            MockSource::quoting("kraken", 1.0, 1.0),
        ),
        "/health",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "sources": ["coinbase", "kraken"]}));
}

#[tokio::test]
async fn request_deadline_bounds_slow_sources() {
    let svc = service(
        vec![
            MockSource::quoting("coinbase", 1.0, 1.0).delayed(Duration::from_secs(30)),
            MockSource::quoting("kraken", 2.0, 2.0),
        ],
        FanOutMode::Concurrent,
    );
    let state = AppState::new(
        Arc::new(svc),
        Duration::from_millis(50),
        Arc::new(CancelHandle::new()),
    );

    let (status, body) = get(create_router(Arc::new(state)), "/buy?amount=1&symbol=BTC").await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 1.0, 2.0, &["kraken"]);
}

#[tokio::test]
async fn real_adapters_against_fake_exchanges() {
    let coinbase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bids": [["64990.00", "0.5", 3]],
            "asks": [["65000.00", "1.2", 1]],
            "sequence": 7
        })))
        .mount(&coinbase)
        .await;

    let kraken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0/public/Depth"))
        .and(query_param("pair", "BTCUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": [],
            "result": {"XXBTZUSD": {
                "asks": [["65000.00", "0.3", 1712000000]],
                "bids": [["64995.50", "1.1", 1712000000]]
            }}
        })))
        .mount(&kraken)
        .await;

    let mut config = SourcesConfig::default();
    config.coinbase.base_url = Some(coinbase.uri());
    config.kraken.base_url = Some(kraken.uri());
    let svc = BestExecutionService::new(sources::from_config(&config), FanOutMode::Concurrent);
    let app = router_with(svc);

    let (status, body) = get(app.clone(), "/buy?amount=2&symbol=BTC").await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 2.0, 130_000.0, &["coinbase", "kraken"]);

    let (status, body) = get(app, "/sell?amount=2&symbol=BTC").await;
    assert_eq!(status, StatusCode::OK);
    assert_quote(&body, "BTC", 2.0, 129_991.0, &["kraken"]);
}
