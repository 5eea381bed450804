//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, body limit, panic guard)
//! - Bind server to listener
//! - Dispatch requests to the proxy or the JSON-RPC shim
//!
//! # Routes
//! ```text
//! GET  /            status descriptor
//! GET  /health      liveness probe (never contacts upstream)
//! ANY  /wp-json/*   authenticated proxy to WordPress
//! POST /mcp         JSON-RPC 2.0 tool shim
//! ```

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::BridgeConfig;
use crate::http::status::{health_handler, root_handler};
use crate::lifecycle::shutdown_signal;
use crate::mcp::{mcp_handler, McpService};
use crate::proxy::{proxy_handler, WordPressClient};

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BridgeConfig>,
    pub client: WordPressClient,
    pub mcp: McpService,
}

impl AppState {
    /// Build handler state from a validated configuration.
    pub fn new(config: BridgeConfig) -> Result<Self, reqwest::Error> {
        let client = WordPressClient::new(config.upstream.clone())?;
        Ok(Self {
            config: Arc::new(config),
            mcp: McpService::new(client.clone()),
            client,
        })
    }
}

/// HTTP server for the bridge.
pub struct HttpServer {
    router: Router,
    config: Arc<BridgeConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::new(config)?;
        let config = state.config.clone();
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);
        let body_limit = state.config.listener.max_body_bytes;

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/wp-json/", any(proxy_handler))
            .route("/wp-json/{*path}", any(proxy_handler))
            .route("/mcp", post(mcp_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request_id))
                    .layer(CatchPanicLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Run the server until a signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            wp_configured = self.config.upstream.is_configured(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
