//! Tests for `GET /` and `GET /health`.

use chrono::DateTime;
use serde_json::Value;
use wp_mcp_bridge::config::BridgeConfig;

mod common;
use common::{client, configured, start_bridge, start_mock_wordpress, MockReply};

#[tokio::test]
async fn test_health_never_contacts_upstream() {
    let wp = start_mock_wordpress(MockReply::json(500, "{}")).await;
    let bridge = start_bridge(configured(&wp.origin())).await;

    let res = client().get(bridge.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["wp_configured"], true);
    assert!(DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    assert!(body["node_version"].as_str().unwrap().starts_with("wp-mcp-bridge/"));
    assert!(wp.requests().is_empty());
}

#[tokio::test]
async fn test_health_when_unconfigured() {
    let bridge = start_bridge(BridgeConfig::default()).await;

    let res = client().get(bridge.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap()["wp_configured"], false);
}

#[tokio::test]
async fn test_root_descriptor() {
    let bridge = start_bridge(configured("https://blog.example")).await;

    let res = client().get(bridge.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "running");
    assert_eq!(body["wp_url"], "https://blog.example");
    assert_eq!(body["endpoints"]["health"], "/health");
    assert_eq!(body["endpoints"]["proxy"], "/wp-json/*");
    assert_eq!(body["endpoints"]["mcp"], "/mcp");
    assert!(body["node_version"].as_str().unwrap().starts_with("wp-mcp-bridge/"));
    assert!(body.get("runtime_version").is_none());
}

#[tokio::test]
async fn test_request_id_and_cors_headers() {
    let bridge = start_bridge(BridgeConfig::default()).await;

    let res = client()
        .get(bridge.url("/health"))
        .header("origin", "https://n8n.example")
        .send()
        .await
        .unwrap();

    let request_id = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_caller_request_id_is_kept() {
    let bridge = start_bridge(BridgeConfig::default()).await;

    let res = client()
        .get(bridge.url("/"))
        .header("x-request-id", "trace-123")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "trace-123");
}
