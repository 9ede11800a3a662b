//! Vision Service Library
//!
//! Service scaffold exposing `/health`, with a lifecycle controller that
//! starts and gracefully stops the HTTP listener under headless (signal
//! driven) or interactive (console driven) control.

pub mod config;
pub mod control;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use control::{InteractiveConsole, run_headless};
pub use lifecycle::{LifecycleController, LifecycleError};
