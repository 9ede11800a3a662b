//! Headless command surface: one start, wait for a termination signal,
//! one stop.

use std::future::Future;
use std::io;

use tracing::info;

use crate::lifecycle::{signals, LifecycleController, LifecycleError};

/// Run until SIGINT or SIGTERM.
pub async fn run_headless(controller: &mut LifecycleController) -> Result<(), LifecycleError> {
    run_headless_until(controller, async {
        signals::termination_signal().await.map(|_| ())
    })
    .await
}

/// Run until `signal` resolves.
///
/// If `signal` fails (e.g. handlers could not be installed) the service is
/// still stopped before the error is returned.
pub async fn run_headless_until<F>(
    controller: &mut LifecycleController,
    signal: F,
) -> Result<(), LifecycleError>
where
    F: Future<Output = io::Result<()>>,
{
    let address = controller.start().await?;
    info!(address = %address, "Service running in headless mode");

    let waited = signal.await;
    controller.stop().await?;
    waited.map_err(LifecycleError::Signal)
}
