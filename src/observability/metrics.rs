//! Metrics collection and exposition.
//!
//! # Metrics
//! - `directory_queries_total` (counter): proxy invocations by outcome, status
//! - `directory_query_duration_seconds` (histogram): handler latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one proxy invocation.
pub fn record_query(outcome: &'static str, status: u16, start: Instant) {
    counter!(
        "directory_queries_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("directory_query_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
