//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (accepted by the lifecycle controller's listener)
//!     → server.rs (request ID, tracing, timeouts)
//!     → health.rs (GET /health)
//!     → Send to client
//! ```

pub mod health;
pub mod server;

pub use health::{HealthStatus, HEALTHY_TEXT};
pub use server::{build_router, with_middleware};
