//! `ANY /wp-json/*` handler.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::types::{ProxiedRequest, ProxyError, ProxyResult};

/// True when `Content-Type` announces a JSON body.
fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Inbound body as JSON. Anything not declared as JSON, or empty, is `{}`.
pub fn inbound_body(headers: &HeaderMap, bytes: &[u8]) -> ProxyResult<Value> {
    if !is_json_content(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    Ok(serde_json::from_slice(bytes)?)
}

fn missing_config_response(missing: crate::config::MissingFields) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "WordPress credentials not configured",
            "missing": missing,
        })),
    )
        .into_response()
}

/// Forward the request to WordPress and mirror its status and body.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();

    if let Err(missing) = state.client.credentials() {
        tracing::warn!(missing = %missing, "Rejecting proxy request, upstream not configured");
        metrics::record_request("wp_json", method.as_str(), 500, start);
        return missing_config_response(missing);
    }

    let body = match inbound_body(&headers, &body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed JSON body");
            metrics::record_request("wp_json", method.as_str(), 400, start);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON body", "message": e.to_string() })),
            )
                .into_response();
        }
    };

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request = ProxiedRequest {
        method: method.clone(),
        path_and_query,
        body: Some(body),
    };

    let response = match state.client.send(request).await {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(upstream.payload)).into_response()
        }
        Err(ProxyError::ConfigurationMissing(missing)) => missing_config_response(missing),
        Err(e) => {
            tracing::error!(error = %e, method = %method, "WordPress API request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "WordPress API request failed",
                    "message": e.to_string(),
                    "wp_url": state.client.origin(),
                })),
            )
                .into_response()
        }
    };

    metrics::record_request("wp_json", method.as_str(), response.status().as_u16(), start);
    response
}
