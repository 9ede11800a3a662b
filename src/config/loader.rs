//! Configuration loading from the process environment.

use std::str::FromStr;

use crate::config::schema::{HealthFormat, LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from environment variables.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Load and validate configuration using `lookup` to resolve variables.
///
/// Missing or empty variables fall back to the schema defaults. A variable
/// that is present but cannot be parsed is an error.
pub fn load_from<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = Env { lookup };
    let mut config = ServiceConfig::default();

    env.string("HOST", &mut config.listener.host);
    env.parsed("PORT", &mut config.listener.port)?;

    env.parsed("READ_TIMEOUT_MS", &mut config.timeouts.read_ms)?;
    env.parsed("WRITE_TIMEOUT_MS", &mut config.timeouts.write_ms)?;
    env.parsed("SHUTDOWN_TIMEOUT_MS", &mut config.timeouts.shutdown_ms)?;

    env.string("LOG_LEVEL", &mut config.logging.level);
    env.parsed("LOG_FORMAT", &mut config.logging.format)?;

    env.string("SERVICE_NAME", &mut config.service.name);
    env.string("SERVICE_VERSION", &mut config.service.version);
    env.string("SERVICE_NAMESPACE", &mut config.service.namespace);

    env.parsed("HEALTH_FORMAT", &mut config.health.format)?;

    env.parsed("METRICS_ENABLED", &mut config.observability.metrics_enabled)?;
    env.string("METRICS_ADDRESS", &mut config.observability.metrics_address);

    // Naming a collector turns trace export on unless TRACING_ENABLED says otherwise.
    if env.get("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        config.observability.tracing_enabled = true;
    }
    env.string("OTEL_EXPORTER_OTLP_ENDPOINT", &mut config.observability.otlp_endpoint);
    env.parsed("TRACING_ENABLED", &mut config.observability.tracing_enabled)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, key: &'static str, slot: &mut String) {
        if let Some(value) = self.get(key) {
            *slot = value;
        }
    }

    fn parsed<T>(&self, key: &'static str, slot: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.get(key) else {
            return Ok(());
        };
        let parsed = value.parse::<T>();
        match parsed {
            Ok(parsed) => {
                *slot = parsed;
                Ok(())
            }
            Err(e) => Err(ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl FromStr for HealthFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(HealthFormat::Text),
            "json" => Ok(HealthFormat::Json),
            other => Err(format!("unknown health format '{}'", other)),
        }
    }
}
