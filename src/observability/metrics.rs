//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_exchanges_total` (counter): exchanges by grant type and status
//! - `proxy_exchange_duration_seconds` (histogram): end-to-end latency
//!
//! # Design Decisions
//! - Prometheus exposition on a dedicated listener, separate from traffic
//! - Recording is a no-op until the exporter is installed, so tests and
//!   library embedders pay nothing

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one token exchange.
pub fn record_exchange(grant_type: &str, status: u16, start_time: Instant) {
    let labels = [
        ("grant_type", grant_type.to_string()),
        ("status", status.to_string()),
    ];

    metrics::counter!("proxy_exchanges_total", &labels).increment(1);
    metrics::histogram!("proxy_exchange_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
