//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for the termination signals (SIGTERM, SIGINT)
//! - Resolve once either arrives
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Only the headless surface listens; interactive mode is driven by stdin

use std::io;

/// Termination signal received by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn termination_signal() -> io::Result<TerminationSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let received = tokio::select! {
        _ = sigterm.recv() => TerminationSignal::Terminate,
        _ = sigint.recv() => TerminationSignal::Interrupt,
    };
    tracing::info!(signal = ?received, "Shutdown signal received");
    Ok(received)
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn termination_signal() -> io::Result<TerminationSignal> {
    tokio::signal::ctrl_c().await?;
    tracing::info!(signal = ?TerminationSignal::Interrupt, "Shutdown signal received");
    Ok(TerminationSignal::Interrupt)
}
