//! The `wp_request` tool: typed arguments and advertised schema.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// Name of the only tool this server exposes.
pub const WP_REQUEST: &str = "wp_request";

/// HTTP methods the tool accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl WpMethod {
    pub const ALL: [WpMethod; 5] = [
        WpMethod::Get,
        WpMethod::Post,
        WpMethod::Put,
        WpMethod::Patch,
        WpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WpMethod::Get => "GET",
            WpMethod::Post => "POST",
            WpMethod::Put => "PUT",
            WpMethod::Patch => "PATCH",
            WpMethod::Delete => "DELETE",
        }
    }

    pub fn to_http(self) -> Method {
        match self {
            WpMethod::Get => Method::GET,
            WpMethod::Post => Method::POST,
            WpMethod::Put => Method::PUT,
            WpMethod::Patch => Method::PATCH,
            WpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for WpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WpMethod {
    type Err = String;

    /// Case-insensitive: `"post"` and `"POST"` are the same method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        WpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| {
                format!(
                    "unsupported method '{}', expected one of {}",
                    s,
                    WpMethod::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

impl<'de> Deserialize<'de> for WpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validated arguments of a `wp_request` call.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WpRequestArgs {
    /// REST path, with or without a leading slash.
    pub path: String,
    /// Absent or `null` means `GET`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: WpMethod,
    /// JSON object sent for non-GET methods.
    #[serde(default)]
    pub body: Option<Map<String, Value>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `params` of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Entry returned by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Descriptor for `wp_request`.
pub fn wp_request_tool() -> ToolDescriptor {
    let methods: Vec<&str> = WpMethod::ALL.iter().map(WpMethod::as_str).collect();
    ToolDescriptor {
        name: WP_REQUEST,
        description: "Call WordPress REST API via /wp-json using configured Basic Auth.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Absolute WP REST path, e.g. /wp-json/wp/v2/posts"
                },
                "method": {
                    "type": "string",
                    "enum": methods,
                    "default": WpMethod::default().as_str()
                },
                "body": {
                    "type": "object",
                    "description": "JSON body for non-GET methods"
                }
            },
            "required": ["path", "method"],
            "additionalProperties": false
        }),
        output_schema: json!({ "type": "object" }),
    }
}

/// Content block inside a `tools/call` result.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
    Json { data: Value },
}
