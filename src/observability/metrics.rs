//! Metrics collection and exposition.
//!
//! # Metrics
//! - `genai_proxy_requests_total` (counter): requests by route, status
//! - `genai_proxy_request_duration_seconds` (histogram): handler latency by route
//! - `genai_proxy_upstream_duration_seconds` (histogram): upstream latency by endpoint
//! - `genai_proxy_upstream_errors_total` (counter): transport failures by endpoint
//! - `genai_proxy_throttled_total` (counter): summarize calls delayed by the throttle
//!
//! Without an installed recorder every call here is a no-op, so handlers
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "genai_proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("genai_proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_call(endpoint: &'static str, ok: bool, start: Instant) {
    histogram!("genai_proxy_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
    if !ok {
        counter!("genai_proxy_upstream_errors_total", "endpoint" => endpoint).increment(1);
    }
}

pub fn record_throttled() {
    counter!("genai_proxy_throttled_total").increment(1);
}
