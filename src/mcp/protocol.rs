//! JSON-RPC 2.0 protocol types

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Inbound JSON-RPC request.
///
/// Every field is optional on the wire: clients that omit `jsonrpc` or `id`
/// are still answered, and the reply echoes whatever `id` was sent
/// (`null` when absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: Value, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id,
            method: Some(method.into()),
            params,
        }
    }
}

/// Either a `result` or an `error`, never both.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(JsonRpcError),
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Error(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&JsonRpcError> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            Outcome::Result(_) => None,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Parse a raw request body.
///
/// On failure returns the error reply to send instead; `id` is recovered
/// from the body when it is at least valid JSON.
pub fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        JsonRpcResponse::error(
            Value::Null,
            error_codes::PARSE_ERROR,
            format!("Parse error: {}", e),
        )
    })?;

    serde_json::from_value(value.clone()).map_err(|e| {
        JsonRpcResponse::error(
            value.get("id").cloned().unwrap_or(Value::Null),
            error_codes::INVALID_REQUEST,
            format!("Invalid request: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_has_no_error_field() {
        let resp = JsonRpcResponse::success(json!(1), json!({ "tools": [] }));
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "jsonrpc": "2.0", "id": 1, "result": { "tools": [] } })
        );
    }

    #[test]
    fn test_error_has_no_result_field() {
        let resp = JsonRpcResponse::error(json!("abc"), error_codes::METHOD_NOT_FOUND, "Method not found");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "error": { "code": -32601, "message": "Method not found" }
            })
        );
        assert!(resp.result().is_none());
    }

    #[test]
    fn test_absent_id_serializes_as_null() {
        let req = parse_request(br#"{"method":"tools/list"}"#).unwrap();
        assert_eq!(req.id, Value::Null);
        assert_eq!(req.jsonrpc, None);

        let resp = JsonRpcResponse::success(req.id, json!({}));
        assert_eq!(serde_json::to_value(&resp).unwrap()["id"], Value::Null);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_request(b"{not json").unwrap_err();
        assert_eq!(err.error_object().unwrap().code, error_codes::PARSE_ERROR);
        assert_eq!(err.id, Value::Null);
    }

    #[test]
    fn test_invalid_request_keeps_id() {
        let err = parse_request(br#"{"id":7,"method":42}"#).unwrap_err();
        assert_eq!(err.error_object().unwrap().code, error_codes::INVALID_REQUEST);
        assert_eq!(err.id, json!(7));
    }

    #[test]
    fn test_new_request_round_trip() {
        let req = JsonRpcRequest::new(json!(5), "initialize", None);
        let wire = serde_json::to_string(&req).unwrap();
        assert_eq!(parse_request(wire.as_bytes()).unwrap(), req);
    }
}
