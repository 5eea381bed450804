//! JSON-RPC tool shim ("MCP" endpoint).
//!
//! # Data Flow
//! ```text
//! POST /mcp body
//!     → protocol.rs (parse envelope, -32700/-32600 on garbage)
//!     → handler.rs (dispatch on method)
//!         tools/call wp_request
//!             → tools.rs (typed argument validation)
//!             → proxy::WordPressClient (same path as /wp-json/*)
//!     → JsonRpcResponse (result xor error, caller's id echoed)
//! ```

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::{mcp_handler, McpService, RpcError};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use tools::{WpMethod, WpRequestArgs, WP_REQUEST};
