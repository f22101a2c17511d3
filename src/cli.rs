//! Command-line interface for ataxx.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ataxx - 7x7 territory game with a console driver
#[derive(Parser, Debug)]
#[command(name = "ataxx")]
#[command(about = "Play Ataxx in the terminal and inspect save files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply when missing)
    #[arg(short, long, global = true, default_value = "ataxx.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on stdin/stdout
    Play {
        /// Override the save file path
        #[arg(long)]
        save_path: Option<PathBuf>,

        /// Start with a blank board instead of a new game
        #[arg(long)]
        blank: bool,
    },

    /// Print a save file as JSON
    Inspect {
        /// Save file to read (config save path if omitted)
        path: Option<PathBuf>,
    },

    /// Write a fresh game to a save file
    New {
        /// Save file to write (config save path if omitted)
        path: Option<PathBuf>,
    },
}
