//! JSON-RPC dispatch for the MCP endpoint.
//!
//! # Responsibilities
//! - Answer the fixed method set (`initialize`, `tools/list`, `tools/call`,
//!   `resources/list`, `prompts/list`)
//! - Report missing credentials, then validate `wp_request` arguments,
//!   before touching the network
//! - Delegate tool calls to the shared [`WordPressClient`]
//!
//! # Design Decisions
//! - Stateless: no session, every call stands alone
//! - Missing credentials on `tools/call` are a successful result carrying a
//!   text notice, while `/wp-json/*` answers 500
//! - Dispatch runs on its own task so a panic still yields a `-32603` reply

use std::future::Future;
use std::time::Instant;

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::MissingFields;
use crate::http::server::AppState;
use crate::mcp::protocol::{error_codes, parse_request, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::tools::{wp_request_tool, ContentBlock, ToolCallParams, WpRequestArgs, WP_REQUEST};
use crate::observability::metrics;
use crate::proxy::translator::normalize_path;
use crate::proxy::{ProxiedRequest, ProxyError, WordPressClient};

/// MCP protocol revision advertised by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name advertised in `serverInfo`.
pub const SERVER_NAME: &str = "wordpress-mcp";

/// Failure of a single dispatch, mapped 1:1 to a JSON-RPC error object.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Method not found")]
    MethodNotFound,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    Internal(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::MethodNotFound | RpcError::UnknownTool(_) => error_codes::METHOD_NOT_FOUND,
            RpcError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            RpcError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

/// The JSON-RPC tool shim.
#[derive(Clone)]
pub struct McpService {
    client: WordPressClient,
}

impl McpService {
    pub fn new(client: WordPressClient) -> Self {
        Self { client }
    }

    /// Answer one request. Always produces a reply carrying the caller's id.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let method = request.method.unwrap_or_default();
        let params = request.params;
        metrics::record_rpc_call(&method);

        let service = self.clone();
        isolated(id, async move { service.dispatch(&method, params).await }).await
    }

    /// Route a method name to its handler.
    pub async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize_result()),
            "tools/list" => Ok(json!({ "tools": [wp_request_tool()] })),
            "tools/call" => self.call_tool(params.unwrap_or(Value::Null)).await,
            "resources/list" => Ok(json!({ "resources": [] })),
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::MethodNotFound),
        }
    }

    async fn call_tool(&self, params: Value) -> Result<Value, RpcError> {
        let params: ToolCallParams =
            serde_json::from_value(params).map_err(|e| RpcError::InvalidParams(e.to_string()))?;

        if params.name != WP_REQUEST {
            return Err(RpcError::UnknownTool(params.name));
        }

        if let Err(missing) = self.client.credentials() {
            return Ok(credentials_notice(missing));
        }

        let args: WpRequestArgs = serde_json::from_value(params.arguments)
            .map_err(|e| RpcError::InvalidParams(e.to_string()))?;

        let request = ProxiedRequest {
            method: args.method.to_http(),
            path_and_query: normalize_path(&args.path).into_owned(),
            body: args.body.map(Value::Object),
        };

        let start = Instant::now();
        match self.client.send(request).await {
            Ok(response) => {
                metrics::record_request("mcp_tool", args.method.as_str(), response.status, start);
                let block = ContentBlock::Json {
                    data: json!({
                        "status": response.status,
                        "url": response.url,
                        "data": response.payload,
                    }),
                };
                Ok(json!({ "content": [block] }))
            }
            Err(ProxyError::ConfigurationMissing(missing)) => Ok(credentials_notice(missing)),
            Err(e) => Err(RpcError::Internal(e.to_string())),
        }
    }
}

/// Run `dispatch` on its own task and turn its outcome, panics included,
/// into a reply for `id`.
async fn isolated<F>(id: Value, dispatch: F) -> JsonRpcResponse
where
    F: Future<Output = Result<Value, RpcError>> + Send + 'static,
{
    match tokio::spawn(dispatch).await {
        Ok(Ok(result)) => JsonRpcResponse::success(id, result),
        Ok(Err(err)) => {
            if let RpcError::Internal(message) = &err {
                tracing::error!(error = %message, "MCP internal error");
            }
            JsonRpcResponse::error(id, err.code(), err.to_string())
        }
        Err(join_err) => {
            let message = panic_message(join_err);
            tracing::error!(error = %message, "MCP dispatch panicked");
            JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, message)
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {}
        }
    })
}

fn credentials_notice(missing: MissingFields) -> Value {
    let block = ContentBlock::Text {
        text: format!("WordPress credentials not configured (missing: {missing})."),
    };
    json!({ "content": [block] })
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return "Internal error".to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Internal error".to_string()
    }
}

/// `POST /mcp`
pub async fn mcp_handler(State(state): State<AppState>, body: Bytes) -> Json<JsonRpcResponse> {
    let response = match parse_request(&body) {
        Ok(request) => state.mcp.handle(request).await,
        Err(reply) => reply,
    };
    Json(response)
}
