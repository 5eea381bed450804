//! Inbound → outbound request translation.
//!
//! # Responsibilities
//! - Normalize the configured origin
//! - Build the upstream URL from origin + path + query
//! - Encode Basic Auth credentials
//! - Decide whether a body travels upstream
//!
//! # Design Decisions
//! - Pure functions only; no I/O, so every rule is unit-testable
//! - Path and query are appended as received, never re-encoded
//! - GET and HEAD never carry a body, whatever the caller sent

use std::borrow::Cow;

use axum::http::Method;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

/// User-Agent sent on every upstream request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Remove trailing slashes from the configured origin.
///
/// `strip_trailing_slash(strip_trailing_slash(x)) == strip_trailing_slash(x)`.
pub fn strip_trailing_slash(origin: &str) -> &str {
    origin.trim_end_matches('/')
}

/// Join the normalized origin with an inbound path and optional raw query.
pub fn upstream_url(origin: &str, path: &str, query: Option<&str>) -> String {
    let base = strip_trailing_slash(origin);
    match query {
        Some(q) => format!("{base}{path}?{q}"),
        None => format!("{base}{path}"),
    }
}

/// Ensure a caller-supplied path begins with `/`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// `Authorization` header value for `username:password`.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Methods that never carry a body upstream.
pub fn is_bodyless(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// The body actually forwarded for `method`.
pub fn outbound_body(method: &Method, body: Option<Value>) -> Option<Value> {
    if is_bodyless(method) {
        None
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_is_idempotent() {
        for origin in ["https://wp.test", "https://wp.test/", "https://wp.test//", "", "/"] {
            let once = strip_trailing_slash(origin);
            assert_eq!(strip_trailing_slash(once), once, "origin {origin:?}");
            assert!(!once.ends_with('/'));
        }
    }

    #[test]
    fn test_url_preserves_path_and_query() {
        let url = upstream_url(
            "https://wp.test/",
            "/wp-json/wp/v2/posts",
            Some("per_page=5&search=caf%C3%A9&_embed"),
        );
        assert_eq!(
            url,
            "https://wp.test/wp-json/wp/v2/posts?per_page=5&search=caf%C3%A9&_embed"
        );
    }

    #[test]
    fn test_url_without_query() {
        assert_eq!(
            upstream_url("https://wp.test", "/wp-json/", None),
            "https://wp.test/wp-json/"
        );
    }

    #[test]
    fn test_url_keeps_empty_query_marker() {
        assert_eq!(
            upstream_url("https://wp.test", "/wp-json/wp/v2/posts", Some("")),
            "https://wp.test/wp-json/wp/v2/posts?"
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("wp/v2/posts"), "/wp/v2/posts");
        assert_eq!(normalize_path("/wp-json/wp/v2/posts"), "/wp-json/wp/v2/posts");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_basic_auth_encoding() {
        // "admin:secret" in standard base64
        assert_eq!(basic_auth("admin", "secret"), "Basic YWRtaW46c2VjcmV0");
        // application passwords contain spaces; they are encoded verbatim
        assert_eq!(
            basic_auth("bot", "abcd efgh"),
            format!("Basic {}", STANDARD.encode("bot:abcd efgh"))
        );
    }

    #[test]
    fn test_get_and_head_drop_body() {
        let body = Some(json!({ "title": "ignored" }));
        assert_eq!(outbound_body(&Method::GET, body.clone()), None);
        assert_eq!(outbound_body(&Method::HEAD, body), None);
    }

    #[test]
    fn test_other_methods_keep_body() {
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS] {
            let body = Some(json!({ "title": "Hello" }));
            assert_eq!(outbound_body(&method, body.clone()), body);
        }
    }
}
