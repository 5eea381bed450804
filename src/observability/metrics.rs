//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wp_bridge_requests_total` (counter): requests by route, method, status
//! - `wp_bridge_request_duration_seconds` (histogram): latency by route
//! - `wp_bridge_rpc_calls_total` (counter): JSON-RPC dispatches by method
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter only runs when `metrics_address` is configured
//! - Label values come from a closed set; caller-supplied names never
//!   become labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// JSON-RPC methods the shim answers.
const RPC_METHODS: [&str; 5] = [
    "initialize",
    "tools/list",
    "tools/call",
    "resources/list",
    "prompts/list",
];

/// Standard HTTP verbs.
const HTTP_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "CONNECT", "TRACE",
];

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Label for a JSON-RPC method: the method itself if known, else `"unknown"`.
pub fn rpc_method_label(method: &str) -> &'static str {
    RPC_METHODS
        .into_iter()
        .find(|known| *known == method)
        .unwrap_or("unknown")
}

/// Label for an HTTP method: the verb if standard, else `"other"`.
pub fn http_method_label(method: &str) -> &'static str {
    HTTP_METHODS
        .into_iter()
        .find(|known| *known == method)
        .unwrap_or("other")
}

/// Record a completed HTTP request.
pub fn record_request(route: &'static str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "wp_bridge_requests_total",
        "route" => route,
        "method" => http_method_label(method),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("wp_bridge_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a JSON-RPC dispatch.
pub fn record_rpc_call(method: &str) {
    metrics::counter!("wp_bridge_rpc_calls_total", "method" => rpc_method_label(method))
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rendered: &str, name: &str) -> Vec<String> {
        rendered
            .lines()
            .filter(|line| line.starts_with(&format!("{name}{{")))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_labels_are_closed_sets() {
        assert_eq!(rpc_method_label("tools/call"), "tools/call");
        assert_eq!(rpc_method_label("completion/complete"), "unknown");
        assert_eq!(http_method_label("PATCH"), "PATCH");
        assert_eq!(http_method_label("PURGE"), "other");
        assert_eq!(http_method_label("get"), "other");
    }

    #[test]
    fn test_junk_rpc_methods_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            for i in 0..500 {
                record_rpc_call(&format!("junk/{i}"));
            }
            record_rpc_call("tools/list");
        });

        let rendered = handle.render();
        let rpc = series(&rendered, "wp_bridge_rpc_calls_total");
        assert_eq!(rpc.len(), 2, "{rendered}");
        assert!(rpc.iter().any(|l| l.contains("method=\"unknown\"") && l.ends_with(" 500")));
        assert!(rpc.iter().any(|l| l.contains("method=\"tools/list\"")));
    }

    #[test]
    fn test_custom_http_verbs_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            for i in 0..50 {
                record_request("wp_json", &format!("X-VERB-{i}"), 200, Instant::now());
            }
        });

        let rendered = handle.render();
        let requests = series(&rendered, "wp_bridge_requests_total");
        assert_eq!(requests.len(), 1, "{rendered}");
        assert!(requests[0].contains("method=\"other\""));
    }
}
