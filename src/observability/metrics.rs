//! Metrics collection and exposition.
//!
//! # Metrics
//! - `health_checks_total` (counter): health endpoint hits
//! - `service_starts_total` (counter): successful listener starts
//! - `service_running` (gauge): 1=listener up, 0=down
//! - `service_shutdown_duration_seconds` (histogram): graceful drain time
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op, so tests need no setup
//! - Prometheus exporter is opt-in via configuration

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder with a scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_health_check() {
    counter!("health_checks_total").increment(1);
}

pub fn record_started() {
    counter!("service_starts_total").increment(1);
    gauge!("service_running").set(1.0);
}

/// Listener handle released, whether or not the drain finished.
pub fn record_down() {
    gauge!("service_running").set(0.0);
}

pub fn record_drained(drain: Duration) {
    histogram!("service_shutdown_duration_seconds").record(drain.as_secs_f64());
}
