//! Liveness and status endpoints.
//!
//! Neither handler touches the upstream; both always answer 200.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::server::AppState;

/// Identifies the running build. Reported under the `node_version` key that
/// existing probes read.
pub const RUNTIME_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub proxy: &'static str,
    pub mcp: &'static str,
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub wp_url: Option<String>,
    pub node_version: &'static str,
    pub endpoints: Endpoints,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// RFC 3339 / ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    pub wp_configured: bool,
    pub node_version: &'static str,
}

pub async fn root_handler(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "running",
        service: env!("CARGO_PKG_NAME"),
        wp_url: state.config.upstream.url.clone(),
        node_version: RUNTIME_VERSION,
        endpoints: Endpoints {
            health: "/health",
            proxy: "/wp-json/*",
            mcp: "/mcp",
        },
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        wp_configured: state.config.upstream.is_configured(),
        node_version: RUNTIME_VERSION,
    })
}
