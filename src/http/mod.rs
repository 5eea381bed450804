//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing)
//!     → status.rs      GET /, GET /health
//!     → proxy::handler ANY /wp-json/*
//!     → mcp::handler   POST /mcp
//! ```

pub mod server;
pub mod status;

pub use server::{AppState, HttpServer, X_REQUEST_ID};
