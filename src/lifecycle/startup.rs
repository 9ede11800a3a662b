//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize trace export, logging, then metrics
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener is not bound here; the command surface decides when

use std::net::{AddrParseError, SocketAddr};

use opentelemetry::trace::TraceError;
use tracing_subscriber::util::TryInitError;

use crate::config::{self, ConfigError, ServiceConfig};
use crate::observability::otlp::Telemetry;
use crate::observability::{logging, metrics};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("failed to build trace exporter: {0}")]
    Tracing(#[from] TraceError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Load configuration from the environment and bring up observability.
///
/// Must run inside a Tokio runtime when metrics or tracing are enabled. The
/// returned [`Telemetry`] must be shut down at exit to flush spans.
pub fn bootstrap() -> Result<(ServiceConfig, Telemetry), StartupError> {
    let config = config::load_from_env()?;
    let telemetry = Telemetry::init(&config.observability, &config.service)?;
    logging::init_logging(&config.logging, telemetry.tracer(&config.service.name))?;

    tracing::info!(
        service = %config.service.name,
        version = %config.service.version,
        namespace = %config.service.namespace,
        port = config.listener.port,
        "Configuration loaded"
    );

    if telemetry.is_enabled() {
        tracing::info!(
            endpoint = %config.observability.otlp_endpoint,
            "Exporting traces to OpenTelemetry collector"
        );
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    Ok((config, telemetry))
}
