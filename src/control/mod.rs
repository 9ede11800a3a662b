//! Command surfaces driving the lifecycle controller.
//!
//! # Modes
//! ```text
//! --headless:  start → wait for SIGINT/SIGTERM → stop
//! interactive: stdin reader thread → one-slot channel → console loop
//!              s → start, q → stop, x → stop + exit
//! ```
//!
//! The two modes are mutually exclusive; whichever runs is the only writer
//! of controller state.

pub mod command;
pub mod headless;
pub mod interactive;

pub use command::Command;
pub use headless::{run_headless, run_headless_until};
pub use interactive::{spawn_line_reader, spawn_stdin_reader, Flow, InteractiveConsole};
