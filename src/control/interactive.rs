//! Interactive command surface.
//!
//! A reader thread forwards input lines over a one-slot channel; the console
//! loop takes them one at a time and drives the controller. The console
//! tracks whether it started the service in its own flag.

use std::io::{self, BufRead, Write};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::control::Command;
use crate::lifecycle::{LifecycleController, LifecycleError};

pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub const BANNER: &str = "\
Computer Vision Service Control
==============================
Press 's' to start the service
Press 'q' to stop the service
Press 'x' to exit
==============================
";

pub const MSG_STARTED: &str = "Service started successfully";
pub const MSG_ALREADY_RUNNING: &str = "Service is already running";
pub const MSG_STOPPED: &str = "Service stopped successfully";
pub const MSG_NOT_RUNNING: &str = "Service is not running";
pub const MSG_EXITING: &str = "Exiting...";
pub const MSG_USAGE: &str = "Invalid command. Use 's' to start, 'q' to stop, or 'x' to exit";

/// Forward lines from `input` on a dedicated thread.
///
/// The channel holds a single pending line, so the reader blocks until the
/// console has taken the previous command. The channel closes on end of
/// input or a read error.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read console input");
                    break;
                }
            }
        }
    });

    rx
}

/// Forward lines typed on standard input.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    spawn_line_reader(io::BufReader::new(io::stdin()))
}

/// Whether the console loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Command loop bound to one controller and one output stream.
pub struct InteractiveConsole<'a, W> {
    controller: &'a mut LifecycleController,
    out: W,
    service_running: bool,
}

impl<'a, W: Write> InteractiveConsole<'a, W> {
    pub fn new(controller: &'a mut LifecycleController, out: W) -> Self {
        Self {
            controller,
            out,
            service_running: false,
        }
    }

    /// The console's own view of whether the service is up.
    pub fn service_running(&self) -> bool {
        self.service_running
    }

    /// Clear the screen, print the banner, then process commands until `x`
    /// or end of input.
    ///
    /// End of input stops a running service without printing anything.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<String>) -> Result<(), LifecycleError> {
        self.print_banner()?;

        while let Some(line) = commands.recv().await {
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            if self.dispatch(command).await? == Flow::Exit {
                return Ok(());
            }
        }

        debug!("Console input closed");
        if self.service_running {
            self.controller.stop().await?;
            self.service_running = false;
        }
        Ok(())
    }

    /// Apply one command.
    pub async fn dispatch(&mut self, command: Command) -> Result<Flow, LifecycleError> {
        debug!(%command, running = self.service_running, "Console command");

        match command {
            Command::Start => {
                if self.service_running {
                    self.say(MSG_ALREADY_RUNNING)?;
                } else {
                    self.controller.start().await?;
                    self.service_running = true;
                    self.say(MSG_STARTED)?;
                }
            }
            Command::Stop => {
                if self.service_running {
                    self.controller.stop().await?;
                    self.service_running = false;
                    self.say(MSG_STOPPED)?;
                } else {
                    self.say(MSG_NOT_RUNNING)?;
                }
            }
            Command::Exit => {
                if self.service_running {
                    self.controller.stop().await?;
                    self.service_running = false;
                }
                self.say(MSG_EXITING)?;
                info!("Console exit requested");
                return Ok(Flow::Exit);
            }
            Command::Unknown(raw) => {
                debug!(input = %raw, "Rejected console input");
                self.say(MSG_USAGE)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn print_banner(&mut self) -> Result<(), LifecycleError> {
        write!(self.out, "{}{}", CLEAR_SCREEN, BANNER)
            .and_then(|()| self.out.flush())
            .map_err(LifecycleError::Console)
    }

    fn say(&mut self, message: &str) -> Result<(), LifecycleError> {
        writeln!(self.out, "{}", message)
            .and_then(|()| self.out.flush())
            .map_err(LifecycleError::Console)
    }
}
