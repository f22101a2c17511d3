//! Ataxx - console entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use ataxx::{AtaxxConfig, Console, GameSession, Snapshot, SnapshotReport};
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AtaxxConfig::load_or_default(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { save_path, blank } => run_play(config, save_path, blank),
        Command::Inspect { path } => {
            let path = path.unwrap_or_else(|| config.save_path().clone());
            run_inspect(path)
        }
        Command::New { path } => {
            let path = path.unwrap_or_else(|| config.save_path().clone());
            run_new(path)
        }
    }
}

/// Run the interactive console on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: AtaxxConfig, save_path: Option<PathBuf>, blank: bool) -> Result<()> {
    let mut config = config;
    if let Some(path) = save_path {
        config = config.with_save_path(path);
    }
    if blank {
        config = config.with_start_on_launch(false);
    }
    info!(save_path = %config.save_path().display(), "Starting console");

    let stdin = std::io::stdin();
    let stdout = BufWriter::new(std::io::stdout());
    let mut console = Console::new(config, LineFlush(stdout));
    console.run(stdin.lock())
}

/// Print a save file as JSON
#[instrument]
fn run_inspect(path: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let snapshot = Snapshot::decode(&text)?;
    let report = SnapshotReport::new(snapshot)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write a freshly started game to a save file
#[instrument]
fn run_new(path: PathBuf) -> Result<()> {
    GameSession::new().save(&path)?;
    info!("New game written");
    println!("wrote {}", path.display());
    Ok(())
}

/// Buffered writer that flushes after every newline so prompts appear
/// before the next read.
struct LineFlush<W: std::io::Write>(W);

impl<W: std::io::Write> std::io::Write for LineFlush<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.0.write(buf)?;
        if buf[..n].contains(&b'\n') {
            self.0.flush()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}
