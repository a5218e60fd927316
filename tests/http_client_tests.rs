//! Integration Tests for the reqwest transport
//!
//! Runs the real client against an in-process axum server to check the
//! license header and the status / network / decode classification.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use catalog_sdk::cache::Cache;
use catalog_sdk::config::ConfigManager;
use catalog_sdk::http::{HttpClient, ReqwestClient, TransportError};
use catalog_sdk::services::BannersService;
use catalog_sdk::SdkError;
use reqwest::Url;
use serde_json::{json, Value};

// == Helper Functions ==

async fn banners_handler(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("x-license-key").and_then(|v| v.to_str().ok()) {
        Some("key-1") => (
            StatusCode::OK,
            Json(json!({
                "data": [{
                    "id": 1,
                    "title": "Summer",
                    "subtitle": "",
                    "web_banner_url": "w",
                    "mobile_banner_url": "m",
                    "redirect_url": "/",
                    "start_date": "2024-01-01",
                    "end_date": "2024-12-31",
                    "active": true,
                    "zone_code": "HOME"
                }],
                "message": "ok"
            })),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "missing key"}))),
    }
}

async fn echo_handler(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "echo": body }))
}

async fn slow_handler() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({}))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/v2/banners/", get(banners_handler))
        .route("/v2/products/filter-by-sku/", post(echo_handler))
        .route(
            "/v2/products/500/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/v2/broken/", get(|| async { "not json" }))
        .route("/v2/slow/", get(slow_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, license_key: &str) -> (ReqwestClient, ConfigManager) {
    let config = ConfigManager::new(&format!("http://{addr}"), license_key).unwrap();
    let client = ReqwestClient::new(config.clone(), Duration::from_millis(500)).unwrap();
    (client, config)
}

fn url(config: &ConfigManager, path: &str) -> Url {
    config.base_url().unwrap().join(path).unwrap()
}

// == License Header ==

#[tokio::test]
async fn test_license_key_header_attached() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");

    let body = client.get(url(&config, "banners/")).await.unwrap();

    assert_eq!(body["data"][0]["id"], 1);
}

#[tokio::test]
async fn test_missing_license_key_is_not_sent() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "");

    let result = client.get(url(&config, "banners/")).await;

    assert_eq!(result, Err(TransportError::Status(401)));
}

#[tokio::test]
async fn test_rotated_license_key_applies_immediately() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "old-key");

    assert!(client.get(url(&config, "banners/")).await.is_err());

    config.set_license_key("key-1").unwrap();
    assert!(client.get(url(&config, "banners/")).await.is_ok());
}

// == Classification ==

#[tokio::test]
async fn test_error_status_is_classified() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");

    assert_eq!(
        client.get(url(&config, "products/500/")).await,
        Err(TransportError::Status(500))
    );
    assert_eq!(
        client.get(url(&config, "nowhere/")).await,
        Err(TransportError::Status(404))
    );
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");

    let result = client.get(url(&config, "broken/")).await;

    assert!(matches!(result, Err(TransportError::Decode(_))));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (client, config) = client(addr, "key-1");

    let result = client.get(url(&config, "banners/")).await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");

    let result = client.get(url(&config, "slow/")).await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");

    let body = client
        .post(url(&config, "products/filter-by-sku/"), json!({"skus": ["A", "B"]}))
        .await
        .unwrap();

    assert_eq!(body, json!({"echo": {"skus": ["A", "B"]}}));
}

// == End To End ==

#[tokio::test]
async fn test_service_over_real_transport() {
    let addr = spawn_server().await;
    let (client, config) = client(addr, "key-1");
    let banners = BannersService::new(Cache::new(), config.clone(), Arc::new(client));

    let fetched = banners.get_banners().await.unwrap();
    assert_eq!(fetched[0].title, "Summer");

    config.set_license_key("revoked").unwrap();
    // Served from the cache, the server is not asked again
    assert_eq!(banners.get_banners().await.unwrap(), fetched);

    banners.invalidate_all();
    let err = banners.get_banners().await.unwrap_err();
    assert!(matches!(err, SdkError::Server(401)));
}
