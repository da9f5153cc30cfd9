//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vault_requests_total` (counter): inbound requests by method, route, status
//! - `vault_request_duration_seconds` (histogram): inbound latency
//! - `vault_upstream_requests_total` (counter): store calls by operation, status
//! - `vault_upstream_duration_seconds` (histogram): store call latency
//!
//! Upstream calls that never produced a status are labelled `status="error"`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    ::metrics::counter!(
        "vault_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "vault_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(elapsed);
}

/// Record a single call to the upstream store.
pub fn record_upstream(operation: &'static str, status: Option<u16>, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    ::metrics::counter!(
        "vault_upstream_requests_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    ::metrics::histogram!("vault_upstream_duration_seconds", "operation" => operation)
        .record(elapsed);
}
