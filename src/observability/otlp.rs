//! OpenTelemetry trace export.
//!
//! # Responsibilities
//! - Build the OTLP/HTTP span exporter for the configured collector
//! - Hand a tracer to the logging subscriber so request spans leave the process
//! - Flush buffered spans at exit
//!
//! # Design Decisions
//! - Optional: disabled unless configured
//! - Batch export on the Tokio runtime

use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};

use crate::config::{ObservabilityConfig, ServiceIdentity};

const TRACES_PATH: &str = "/v1/traces";

/// Collector URL for span export: the base endpoint plus the OTLP/HTTP
/// traces path.
pub fn traces_endpoint(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with(TRACES_PATH) {
        base.to_string()
    } else {
        format!("{}{}", base, TRACES_PATH)
    }
}

/// The installed trace pipeline, if any.
#[derive(Debug, Default)]
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Build the export pipeline when tracing is enabled.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn init(
        config: &ObservabilityConfig,
        service: &ServiceIdentity,
    ) -> Result<Self, TraceError> {
        if !config.tracing_enabled {
            return Ok(Self::default());
        }

        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(traces_endpoint(&config.otlp_endpoint))
            .build()?;

        let resource = Resource::new([
            KeyValue::new("service.name", service.name.clone()),
            KeyValue::new("service.version", service.version.clone()),
            KeyValue::new("service.namespace", service.namespace.clone()),
        ]);

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(resource)
            .build();
        opentelemetry::global::set_tracer_provider(provider.clone());

        Ok(Self {
            provider: Some(provider),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn tracer(&self, name: &str) -> Option<Tracer> {
        self.provider
            .as_ref()
            .map(|provider| provider.tracer(name.to_string()))
    }

    /// Flush and stop the exporter.
    pub fn shutdown(self) {
        let Some(provider) = self.provider else {
            return;
        };
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Failed to flush trace exporter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traces_endpoint_appends_path() {
        assert_eq!(
            traces_endpoint("http://localhost:4318"),
            "http://localhost:4318/v1/traces"
        );
        assert_eq!(
            traces_endpoint("http://collector:4318/"),
            "http://collector:4318/v1/traces"
        );
        assert_eq!(
            traces_endpoint("https://collector/v1/traces"),
            "https://collector/v1/traces"
        );
    }

    #[test]
    fn test_disabled_pipeline_has_no_tracer() {
        let telemetry =
            Telemetry::init(&ObservabilityConfig::default(), &ServiceIdentity::default()).unwrap();
        assert!(!telemetry.is_enabled());
        assert!(telemetry.tracer("vision-service").is_none());
        telemetry.shutdown();
    }
}
