//! Request/response values and error definitions for the upstream proxy.

use axum::http::Method;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::MissingFields;

/// A request about to be sent to WordPress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Path (always starting with `/`) plus query string, exactly as received.
    pub path_and_query: String,
    /// JSON body; dropped for GET and HEAD.
    pub body: Option<Value>,
}

/// Upstream body after the parse attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    /// Body parsed as JSON.
    Json(Value),
    /// Body was empty or not JSON; carried verbatim.
    Raw(String),
}

impl UpstreamPayload {
    /// Classify an upstream body. Never fails.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(text),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Relayed to callers as the parsed JSON, or `{"raw": text}`.
impl Serialize for UpstreamPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Raw(text) => json!({ "raw": text }).serialize(serializer),
        }
    }
}

/// What came back from WordPress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedResponse {
    pub status: u16,
    /// Fully resolved upstream URL the request was sent to.
    pub url: String,
    pub payload: UpstreamPayload,
}

/// Errors that can occur while proxying.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// One or more of origin/username/password is absent.
    #[error("WordPress credentials not configured (missing: {0})")]
    ConfigurationMissing(MissingFields),

    /// Transport-level failure talking to WordPress (DNS, connect, timeout).
    #[error("{0}")]
    UpstreamRequestFailed(#[from] reqwest::Error),

    /// Inbound body declared as JSON but could not be parsed.
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
