//! Outbound WordPress client.
//!
//! # Responsibilities
//! - Hold the single upstream configuration
//! - Refuse to send when credentials are incomplete
//! - Perform exactly one authenticated request per call
//! - Turn the upstream body into an [`UpstreamPayload`]
//!
//! # Design Decisions
//! - No retries: a failed attempt surfaces directly to the caller
//! - Timeout only when `upstream.timeout_secs` is configured
//! - Inbound headers are never forwarded; the header set is fixed

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::config::{Credentials, MissingFields, UpstreamConfig};
use crate::proxy::translator::{basic_auth, outbound_body, upstream_url, USER_AGENT};
use crate::proxy::types::{ProxiedRequest, ProxiedResponse, ProxyError, ProxyResult, UpstreamPayload};

/// Client for the configured WordPress REST API.
#[derive(Clone)]
pub struct WordPressClient {
    http: reqwest::Client,
    upstream: Arc<UpstreamConfig>,
}

impl WordPressClient {
    /// Create a client for `upstream`.
    pub fn new(upstream: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            upstream: Arc::new(upstream),
        })
    }

    /// Configured origin as given, if any.
    pub fn origin(&self) -> Option<&str> {
        self.upstream.url.as_deref()
    }

    pub fn credentials(&self) -> Result<Credentials<'_>, MissingFields> {
        self.upstream.credentials()
    }

    /// Send `request` to WordPress and read the whole response.
    ///
    /// `path_and_query` is appended to the normalized origin untouched.
    pub async fn send(&self, request: ProxiedRequest) -> ProxyResult<ProxiedResponse> {
        let creds = self
            .credentials()
            .map_err(ProxyError::ConfigurationMissing)?;

        let (path, query) = match request.path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request.path_and_query.as_str(), None),
        };
        let url = upstream_url(creds.url, path, query);

        tracing::info!(method = %request.method, url = %url, "Proxying request");

        let mut outbound = self
            .http
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, basic_auth(creds.username, creds.password))
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = outbound_body(&request.method, request.body) {
            outbound = outbound.body(body.to_string());
        }

        let response = outbound.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let payload = UpstreamPayload::from_text(text);

        tracing::debug!(
            status,
            url = %url,
            json = payload.is_json(),
            "Upstream responded"
        );

        Ok(ProxiedResponse {
            status,
            url,
            payload,
        })
    }
}
