//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Lifecycle controller and HTTP handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!     → otlp.rs (request spans, via the logging subscriber)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//!     → OpenTelemetry collector (OTLP/HTTP)
//! ```

pub mod logging;
pub mod metrics;
pub mod otlp;
