//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, LOG_LEVEL, ...)
//!     → loader.rs (lookup, defaults, parse)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the lifecycle controller and observability setup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Missing or empty variables fall back to defaults
//! - Validation separates parsing from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from, load_from_env, ConfigError};
pub use schema::{
    HealthConfig, HealthFormat, ListenerConfig, LogFormat, LoggingConfig, ObservabilityConfig,
    ServiceConfig, ServiceIdentity, TimeoutConfig,
};
