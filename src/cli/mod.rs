//! Command-line interface for play-queue.
//!
//! This module provides an interactive queue shell and a script runner that
//! drive the play queue and a simulated playback engine.

mod commands;
mod script;
mod session;

pub use commands::{Cli, run_command};
