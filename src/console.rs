//! Line-oriented console driver.
//!
//! Stands in for a graphical front end: each input line is a click, a timer
//! tick or a session command. Output goes to any [`Write`] so sessions can
//! be scripted and tested.

use crate::config::AtaxxConfig;
use crate::report::{SessionReport, render_board, status_line};
use ataxx_rules::{Activation, GameError, GameSession};
use derive_more::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Command keywords understood by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verb {
    /// Click a cell: `click <row> <col>`.
    Click,
    /// Drop the current selection.
    Clear,
    /// Advance the clock: `tick [seconds]`.
    Tick,
    /// Start a new game.
    New,
    /// Blank the board and stop the clock.
    Clean,
    /// Write the save file.
    Save,
    /// Read the save file.
    Load,
    /// Print the board.
    Show,
    /// Print the status line.
    Status,
    /// Print the session as JSON.
    Json,
    /// List commands.
    Help,
    /// Leave the console.
    Quit,
}

impl Verb {
    /// Usage text for the help listing.
    pub fn usage(self) -> &'static str {
        match self {
            Verb::Click => "click <row> <col>  (or just <row> <col>)",
            Verb::Clear => "clear              drop the selection",
            Verb::Tick => "tick [n]           advance the clock",
            Verb::New => "new                start a new game",
            Verb::Clean => "clean              blank the board",
            Verb::Save => "save               write the save file",
            Verb::Load => "load               read the save file",
            Verb::Show => "show               print the board",
            Verb::Status => "status             print the status line",
            Verb::Json => "json               print the session as JSON",
            Verb::Help => "help               list commands",
            Verb::Quit => "quit               leave",
        }
    }
}

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Cell activation.
    Click {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// Clear the selection.
    Clear,
    /// Advance the clock by the given number of seconds.
    Tick(u32),
    /// Start a new game.
    New,
    /// Blank the board.
    Clean,
    /// Write the save file.
    Save,
    /// Read the save file.
    Load,
    /// Print the board.
    Show,
    /// Print the status line.
    Status,
    /// Print JSON.
    Json,
    /// List commands.
    Help,
    /// Leave.
    Quit,
}

/// Error parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// The first word is not a known command.
    #[display("unknown command `{}` (try `help`)", _0)]
    Unknown(String),
    /// An argument is missing or not a number.
    #[display("usage: {}", _0)]
    Usage(&'static str),
}

impl std::error::Error for CommandError {}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = words.first() else {
            return Err(CommandError::Unknown(String::new()));
        };

        // Bare coordinates are a click.
        if first.parse::<usize>().is_ok() {
            return parse_click(&words, Verb::Click.usage());
        }

        let verb = Verb::from_str(first).map_err(|_| CommandError::Unknown(first.to_string()))?;
        let args = &words[1..];
        let no_args = |command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(CommandError::Usage(verb.usage()))
            }
        };
        match verb {
            Verb::Click => parse_click(args, verb.usage()),
            Verb::Tick => match args {
                [] => Ok(Command::Tick(1)),
                [n] => n
                    .parse()
                    .map(Command::Tick)
                    .map_err(|_| CommandError::Usage(verb.usage())),
                _ => Err(CommandError::Usage(verb.usage())),
            },
            Verb::Clear => no_args(Command::Clear),
            Verb::New => no_args(Command::New),
            Verb::Clean => no_args(Command::Clean),
            Verb::Save => no_args(Command::Save),
            Verb::Load => no_args(Command::Load),
            Verb::Show => no_args(Command::Show),
            Verb::Status => no_args(Command::Status),
            Verb::Json => no_args(Command::Json),
            Verb::Help => no_args(Command::Help),
            Verb::Quit => no_args(Command::Quit),
        }
    }
}

fn parse_click(args: &[&str], usage: &'static str) -> Result<Command, CommandError> {
    match args {
        [row, col] => {
            let row = row.parse().map_err(|_| CommandError::Usage(usage))?;
            let col = col.parse().map_err(|_| CommandError::Usage(usage))?;
            Ok(Command::Click { row, col })
        }
        _ => Err(CommandError::Usage(usage)),
    }
}

/// Whether the console keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop.
    Quit,
}

/// Console driver owning one game session.
#[derive(Debug)]
pub struct Console<W: Write> {
    session: GameSession,
    config: AtaxxConfig,
    out: W,
}

impl<W: Write> Console<W> {
    /// Creates a console; the session starts as configured.
    #[instrument(skip(out))]
    pub fn new(config: AtaxxConfig, out: W) -> Self {
        let session = if *config.start_on_launch() {
            GameSession::new()
        } else {
            GameSession::blank()
        };
        Self {
            session,
            config,
            out,
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Consumes the console, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints the board, then executes lines until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        self.print_board()?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }
        info!(
            move_count = self.session.move_count(),
            result = %self.session.result(),
            "Console finished"
        );
        Ok(())
    }

    /// Executes one input line.
    ///
    /// Parse errors and out-of-board clicks are reported on the output;
    /// only I/O failures on the output are returned as errors.
    #[instrument(skip(self))]
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, "Unparsed input");
                writeln!(self.out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Click { row, col } => self.click(row, col)?,
            Command::Clear => match self.session.clear_selection() {
                Ok(()) => self.print_board()?,
                Err(GameError::NoActiveSelection) => debug!("Nothing to clear"),
                Err(e) => writeln!(self.out, "{}", e)?,
            },
            Command::Tick(seconds) => {
                for _ in 0..seconds {
                    if !self.session.tick() {
                        break;
                    }
                }
            }
            Command::New => {
                self.session.new_game();
                self.print_board()?;
            }
            Command::Clean => {
                self.session.clean();
                self.print_board()?;
            }
            Command::Save => match self.session.save(self.config.save_path()) {
                Ok(()) => writeln!(self.out, "saved to {}", self.config.save_path().display())?,
                Err(e) => {
                    warn!(error = %e, "Save failed");
                    writeln!(self.out, "save failed: {}", e.message)?;
                }
            },
            Command::Load => match self.session.load(self.config.save_path()) {
                Ok(()) => self.print_board()?,
                Err(_) => writeln!(self.out, "no saved game")?,
            },
            Command::Show => self.print_board()?,
            Command::Status => writeln!(self.out, "{}", status_line(&self.session))?,
            Command::Json => {
                let report = SessionReport::from_session(&self.session);
                writeln!(self.out, "{}", serde_json::to_string(&report)?)?;
            }
            Command::Help => {
                for verb in Verb::iter() {
                    writeln!(self.out, "  {}", verb.usage())?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn click(&mut self, row: usize, col: usize) -> anyhow::Result<()> {
        match self.session.handle_cell_activation(row, col) {
            Ok(Activation::Ignored) => {}
            Ok(Activation::Selected(_) | Activation::Reselected(_)) => self.print_board()?,
            Ok(Activation::Moved { mv, kind, move_count, .. }) => {
                writeln!(self.out, "{} {}: {} (move {})", kind, mv, self.session.result(), move_count)?;
                self.print_board()?;
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn print_board(&mut self) -> anyhow::Result<()> {
        write!(self.out, "{}", render_board(&self.session, *self.config.show_tags()))?;
        writeln!(self.out, "{}", status_line(&self.session))?;
        Ok(())
    }
}
