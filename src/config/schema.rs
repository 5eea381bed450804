//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits so a TOML file can supply any subset of them.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (port, body limit).
    pub listener: ListenerConfig,

    /// The single WordPress upstream and its credentials.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind on.
    pub host: String,

    /// TCP port (`PORT`).
    pub port: u16,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Upstream WordPress origin and Basic Auth credentials.
///
/// Every field is optional: a bridge with missing credentials still starts
/// and answers probes, it just refuses to proxy.
#[derive(Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Site origin (`WP_API_URL`), e.g. `https://example.com`.
    pub url: Option<String>,

    /// Basic Auth user (`WP_API_USERNAME`).
    pub username: Option<String>,

    /// Application password (`WP_API_PASSWORD`).
    pub password: Option<String>,

    /// Optional bound on a single upstream call (`WP_API_TIMEOUT_SECS`).
    /// `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Which upstream fields are absent.
///
/// Serializes with the environment variable names so operators can tell
/// exactly which variable to set.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MissingFields {
    #[serde(rename = "WP_API_URL")]
    pub url: bool,
    #[serde(rename = "WP_API_USERNAME")]
    pub username: bool,
    #[serde(rename = "WP_API_PASSWORD")]
    pub password: bool,
}

impl MissingFields {
    pub fn any(&self) -> bool {
        self.url || self.username || self.password
    }
}

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = [
            (self.url, "WP_API_URL"),
            (self.username, "WP_API_USERNAME"),
            (self.password, "WP_API_PASSWORD"),
        ]
        .into_iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, name)| name)
        .collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Borrowed view of a fully configured upstream.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl UpstreamConfig {
    /// Report which of the three required fields are absent or empty.
    pub fn missing(&self) -> MissingFields {
        MissingFields {
            url: present(&self.url).is_none(),
            username: present(&self.username).is_none(),
            password: present(&self.password).is_none(),
        }
    }

    /// True when origin, username and password are all present.
    pub fn is_configured(&self) -> bool {
        !self.missing().any()
    }

    /// Resolve the credentials, or the set of missing fields.
    pub fn credentials(&self) -> Result<Credentials<'_>, MissingFields> {
        match (
            present(&self.url),
            present(&self.username),
            present(&self.password),
        ) {
            (Some(url), Some(username), Some(password)) => Ok(Credentials {
                url,
                username,
                password,
            }),
            _ => Err(self.missing()),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Prometheus exporter bind address; `None` disables the exporter.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_address: None,
        }
    }
}
