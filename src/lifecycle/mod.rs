//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Init logging → Init metrics
//!
//! Controller (controller.rs):
//!     start(): bind → spawn accept loop
//!     stop():  trigger shutdown → drain (bounded) → clear handle
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → headless surface calls stop()
//! ```
//!
//! # Design Decisions
//! - One controller owns at most one listener
//! - Shutdown has a deadline: exceeding it is reported as an error
//! - Errors propagate to the command surface instead of exiting in place

pub mod controller;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use controller::{LifecycleController, LifecycleError, ServerHandle};
pub use shutdown::Shutdown;
pub use signals::{termination_signal, TerminationSignal};
pub use startup::{bootstrap, StartupError};
