//! WordPress REST proxy with a JSON-RPC tool shim.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http::server ──┬─ GET /, /health ──▶ http::status
//!                               │
//!                               ├─ ANY /wp-json/* ──▶ proxy::handler ──┐
//!                               │                                      ├─▶ proxy::client ──▶ WordPress
//!                               └─ POST /mcp ──────▶ mcp::handler ─────┘
//! ```
//!
//! Configuration is read once at startup into an immutable
//! [`BridgeConfig`] and shared by the proxy and the JSON-RPC shim.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mcp;
pub mod observability;
pub mod proxy;

pub use config::schema::BridgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
