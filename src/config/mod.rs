//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → process environment overlay (loader.rs)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → shared via Arc to the proxy and the JSON-RPC shim
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated afterwards
//! - All fields have defaults to allow minimal configs
//! - Absent credentials are a degraded state, detected per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_with, ConfigError};
pub use schema::{
    BridgeConfig, Credentials, ListenerConfig, LogFormat, MissingFields, ObservabilityConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
