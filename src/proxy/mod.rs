//! WordPress proxy translator.
//!
//! # Data Flow
//! ```text
//! inbound request (method, path?query, JSON body)
//!     → handler.rs (config check, body decode)
//!     → translator.rs (URL, Basic credentials, body policy)
//!     → client.rs (one reqwest call, text → UpstreamPayload)
//!     → handler.rs (mirror status, JSON payload or {raw})
//! ```
//!
//! The JSON-RPC shim reuses `client.rs` for `tools/call`.

pub mod client;
pub mod handler;
pub mod translator;
pub mod types;

pub use client::WordPressClient;
pub use handler::proxy_handler;
pub use types::{ProxiedRequest, ProxiedResponse, ProxyError, ProxyResult, UpstreamPayload};
