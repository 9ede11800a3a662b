//! Lifecycle controller for the HTTP listener.
//!
//! # State Machine
//! ```text
//! ABSENT  --start()-------------------> RUNNING
//! RUNNING --stop() [drained]----------> ABSENT
//! RUNNING --stop() [deadline passed]--> error (ShutdownTimeout)
//! ABSENT  --start() [bind failure]----> error (Bind)
//! ```
//!
//! Errors are returned, not acted on: the command surface decides to
//! escalate them to process exit.

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::http;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Error type for lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("service already running on {0}")]
    AlreadyRunning(SocketAddr),

    #[error("server forced to shutdown: connections still open after {0:?}")]
    ShutdownTimeout(Duration),

    #[error("server failed while serving: {0}")]
    Serve(#[source] io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] JoinError),

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] io::Error),

    #[error("console I/O failed: {0}")]
    Console(#[source] io::Error),
}

/// A running listener. Exists only between a successful `start()` and the
/// matching `stop()`.
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<io::Result<()>>,
    started_at: Instant,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Owns the single live-or-absent server instance.
pub struct LifecycleController {
    config: ServiceConfig,
    app: Router,
    server: Option<ServerHandle>,
}

impl LifecycleController {
    /// Controller serving the standard `/health` router.
    pub fn new(config: ServiceConfig) -> Self {
        let app = http::build_router(&config);
        Self::with_router(config, app)
    }

    /// Controller serving an arbitrary router.
    pub fn with_router(config: ServiceConfig, app: Router) -> Self {
        Self {
            config,
            app,
            server: None,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.server.is_some()
    }

    /// Bound address of the running listener.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(ServerHandle::local_addr)
    }

    /// Bind the listener and start serving on a background task.
    ///
    /// Returns as soon as the socket is bound. Refuses to start a second
    /// listener while one is running.
    pub async fn start(&mut self) -> Result<SocketAddr, LifecycleError> {
        if let Some(server) = &self.server {
            return Err(LifecycleError::AlreadyRunning(server.local_addr));
        }

        let address = self.config.listener.bind_address();
        info!(
            address = %address,
            port = self.config.listener.port,
            "Starting service"
        );

        let listener = TcpListener::bind(address.as_str())
            .await
            .map_err(|source| LifecycleError::Bind {
                address: address.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| LifecycleError::Bind { address, source })?;

        let shutdown = Shutdown::new();
        let signal = shutdown.signalled();
        let app = self.app.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
        });

        info!(address = %local_addr, "Listening for connections");
        metrics::record_started();

        self.server = Some(ServerHandle {
            local_addr,
            shutdown,
            task,
            started_at: Instant::now(),
        });
        Ok(local_addr)
    }

    /// Gracefully stop the running listener, if any.
    ///
    /// New connections are refused immediately; in-flight requests get until
    /// the configured shutdown deadline to finish. The handle is cleared in
    /// every case.
    pub async fn stop(&mut self) -> Result<(), LifecycleError> {
        let Some(mut server) = self.server.take() else {
            debug!("Stop requested but no server is running");
            return Ok(());
        };

        let deadline = self.config.timeouts.shutdown();
        info!(
            address = %server.local_addr,
            deadline_ms = deadline.as_millis() as u64,
            "Shutting down server"
        );

        let drain_started = Instant::now();
        server.shutdown.trigger();

        let outcome = tokio::time::timeout(deadline, &mut server.task).await;
        metrics::record_down();

        match outcome {
            Ok(Ok(Ok(()))) => {
                let drained = drain_started.elapsed();
                metrics::record_drained(drained);
                info!(
                    uptime_ms = server.uptime().as_millis() as u64,
                    drain_ms = drained.as_millis() as u64,
                    "Server stopped"
                );
                Ok(())
            }
            Ok(Ok(Err(e))) => Err(LifecycleError::Serve(e)),
            Ok(Err(e)) => Err(LifecycleError::Task(e)),
            Err(_) => {
                warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    "In-flight requests did not drain before the deadline"
                );
                server.task.abort();
                Err(LifecycleError::ShutdownTimeout(deadline))
            }
        }
    }
}
