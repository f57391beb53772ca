//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::script::{self, HELP};
use super::session::{Outcome, Session};
use crate::config::{self, Config};
use crate::library;
use crate::model::Track;
use crate::player::SimulatedEngine;

/// Play Queue CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file to browse and queue from (overrides the config file)
    #[arg(long, global = true, env = "PLAY_QUEUE_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Interactive queue shell (default)
    Shell,
    /// Run a file of shell commands and print the resulting queue panel
    Run {
        /// Path to the script
        script: PathBuf,
        /// Print the panel as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the tracks in the catalog
    Catalog,
    /// Show the configuration file location and effective settings
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command. No command starts the shell.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load();

    match &cli.command {
        None | Some(Commands::Shell) => cmd_shell(&config, cli.catalog.as_deref()),
        Some(Commands::Run { script, json }) => {
            cmd_run(&config, cli.catalog.as_deref(), script, *json)
        }
        Some(Commands::Catalog) => cmd_catalog(&config, cli.catalog.as_deref()),
        Some(Commands::Config { init }) => cmd_config(&config, *init),
    }
}

// ============================================================================
// Individual command implementations
// ============================================================================

fn load_tracks(config: &Config, catalog: Option<&Path>) -> anyhow::Result<Vec<Track>> {
    match catalog.or(config.library.catalog.as_deref()) {
        Some(path) => Ok(library::load_catalog(path)?),
        None => {
            info!("No catalog configured, using the built-in demo catalog");
            Ok(library::demo_catalog())
        }
    }
}

fn new_session(config: &Config, catalog: Option<&Path>) -> anyhow::Result<Session> {
    let tracks = load_tracks(config, catalog)?;
    let engine = SimulatedEngine::new(tracks, config.engine.fallback);
    Ok(Session::new(engine, config.panel.open_on_start))
}

fn cmd_shell(config: &Config, catalog: Option<&Path>) -> anyhow::Result<()> {
    let mut session = new_session(config, catalog)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{}", HELP);
    print!("> ");
    stdout.flush()?;

    for (i, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading from stdin")?;
        match script::parse_line(&line, i + 1) {
            Ok(Some(command)) => match session.execute(command) {
                Outcome::Quit => return Ok(()),
                Outcome::Continue(Some(message)) => println!("{}", message),
                Outcome::Continue(None) => {}
            },
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
        print!("> ");
        stdout.flush()?;
    }
    println!();
    Ok(())
}

fn cmd_run(
    config: &Config,
    catalog: Option<&Path>,
    script_path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let commands = script::parse_script(&contents)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    let mut session = new_session(config, catalog)?;
    info!("Running {} commands from {:?}", commands.len(), script_path);
    for command in commands {
        match session.execute(command) {
            Outcome::Quit => break,
            Outcome::Continue(Some(message)) if !json => println!("{}", message),
            Outcome::Continue(_) => {}
        }
    }

    if json {
        println!("{}", session.panel_json()?);
    } else {
        print!("{}", session.panel());
        println!("{}", session.status_line());
    }
    Ok(())
}

fn cmd_catalog(config: &Config, catalog: Option<&Path>) -> anyhow::Result<()> {
    let tracks = load_tracks(config, catalog)?;
    for track in &tracks {
        println!(
            "{:<12} {} - {}",
            track.id.as_str(),
            track.display_title(),
            track.display_artist()
        );
    }
    println!("{} tracks", tracks.len());
    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (no config directory on this system)"),
    }

    if init {
        let path = config::save(config)?;
        println!("Wrote {}", path.display());
    }

    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
