//! Metrics collection and exposition.
//!
//! # Metrics
//! - `reviews_requests_total` (counter): requests by operation, status
//! - `reviews_request_duration_seconds` (histogram): handler latency by operation
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op (tests, metrics disabled)
//! - The Prometheus exporter serves its own listener

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(operation: &str, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "reviews_requests_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "reviews_request_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
