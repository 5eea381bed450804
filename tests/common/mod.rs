//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use wp_mcp_bridge::config::{BridgeConfig, UpstreamConfig};
use wp_mcp_bridge::{HttpServer, Shutdown};

pub const USERNAME: &str = "editor";
pub const PASSWORD: &str = "abcd efgh ijkl";

/// A request as seen by the mock WordPress.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Origin-form target: path plus query.
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// What the mock WordPress answers with.
#[derive(Debug, Clone, Copy)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: &'static str,
}

impl MockReply {
    pub fn json(status: u16, body: &'static str) -> Self {
        Self { status, content_type: "application/json", body }
    }

    pub fn html(status: u16, body: &'static str) -> Self {
        Self { status, content_type: "text/html; charset=UTF-8", body }
    }
}

pub struct MockWordPress {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockWordPress {
    /// Origin with a trailing slash, as operators often configure it.
    pub fn origin(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> CapturedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call");
        requests.into_iter().next().unwrap()
    }
}

/// Start a mock WordPress that records every request and replies with `reply`.
pub async fn start_mock_wordpress(reply: MockReply) -> MockWordPress {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    let app = Router::new().fallback(move |req: Request<Body>| {
        let sink = sink.clone();
        async move {
            let (parts, body) = req.into_parts();
            let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
            sink.lock().unwrap().push(CapturedRequest {
                method: parts.method.to_string(),
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
            (
                StatusCode::from_u16(reply.status).unwrap(),
                [("content-type", reply.content_type)],
                reply.body,
            )
                .into_response()
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockWordPress { addr, captured }
}

/// Config pointing at `origin` with full credentials.
pub fn configured(origin: &str) -> BridgeConfig {
    let mut config = BridgeConfig::default();
    config.upstream = UpstreamConfig {
        url: Some(origin.to_string()),
        username: Some(USERNAME.to_string()),
        password: Some(PASSWORD.to_string()),
        timeout_secs: Some(10),
    };
    config
}

/// A running bridge bound to an ephemeral port.
pub struct Bridge {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Bridge {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_bridge(config: BridgeConfig) -> Bridge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    Bridge { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
