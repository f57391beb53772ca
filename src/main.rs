//! Play Queue - a reorderable play queue with queue-aware playback control.
//!
//! The queue keeps an ordered, duplicate-free track list and a cursor that
//! follows its track through edits. A playback bridge routes skips through
//! the queue and keeps the cursor in step with whatever the engine plays.
//! The binary drives both through an interactive shell or a script.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod player;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr keeps shell output on stdout clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("play_queue=info".parse()?))
        .init();

    cli::run_command(&args)
}
