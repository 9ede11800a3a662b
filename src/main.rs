//! Vision Service
//!
//! A Windows-friendly service scaffold for computer vision workloads that
//! identify lines of people and vehicles for order processing. Exposes a
//! health endpoint and can run unattended or under operator control.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │        Command Surface       │   --headless: SIGINT/SIGTERM
//!   │  headless  |  interactive    │   otherwise:  s / q / x on stdin
//!   └──────────────┬───────────────┘
//!                  │ start() / stop()
//!                  ▼
//!   ┌──────────────────────────────┐
//!   │     Lifecycle Controller     │   owns at most one listener,
//!   │                              │   bounded graceful shutdown
//!   └──────────────┬───────────────┘
//!                  │ bind + spawn
//!                  ▼
//!   ┌──────────────────────────────┐
//!   │   Axum listener: GET /health │
//!   └──────────────────────────────┘
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;

use vision_service::control::{self, InteractiveConsole};
use vision_service::lifecycle::{self, LifecycleController};

#[derive(Parser, Debug)]
#[command(name = "vision-service", version)]
#[command(about = "Computer Vision Service for line detection")]
#[command(
    long_about = "A Windows-based service for computer vision capabilities to identify lines of people \
and vehicles for order processing."
)]
struct Cli {
    /// Run service in headless mode
    #[arg(short = 'H', long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let (config, telemetry) = match lifecycle::bootstrap() {
        Ok(bootstrapped) => bootstrapped,
        Err(e) => {
            eprintln!("vision-service: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut controller = LifecycleController::new(config);

    let outcome = if cli.headless {
        control::run_headless(&mut controller).await
    } else {
        let commands = control::spawn_stdin_reader();
        InteractiveConsole::new(&mut controller, io::stdout())
            .run(commands)
            .await
    };

    let code = match outcome {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal lifecycle error");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}
