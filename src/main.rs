//! Kibitzer -- an observation-driven chess session tracker.
//!
//! Reads board observations and oracle replies from an operator console,
//! reconstructs each move, and answers with the display coordinates to
//! perform. See the library crate for the session internals.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use kibitzer::board::Colour;
use kibitzer::console::Console;
use kibitzer::session::{RetryPolicy, Session, SessionOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColourArg {
    White,
    Black,
}

impl From<ColourArg> for Colour {
    fn from(arg: ColourArg) -> Colour {
        match arg {
            ColourArg::White => Colour::White,
            ColourArg::Black => Colour::Black,
        }
    }
}

/// Track a chess game from piece observations and play an oracle's moves
#[derive(Parser)]
#[command(name = "kibitzer", version, about)]
struct Cli {
    /// Own colour; prompted interactively when omitted
    #[arg(long, value_enum)]
    colour: Option<ColourArg>,

    /// Oracle query attempts per turn, including the first
    #[arg(long, default_value_t = 4)]
    oracle_attempts: u32,

    /// Delay in milliseconds before the first oracle retry
    #[arg(long, default_value_t = 500)]
    oracle_backoff_ms: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    if let Some(colour) = cli.colour {
        console = console.with_colour(colour.into());
    }

    let retry = RetryPolicy {
        max_attempts: cli.oracle_attempts,
        initial_delay: Duration::from_millis(cli.oracle_backoff_ms),
        backoff_factor: 2,
    };

    let mut session = Session::new(console).with_retry(retry);
    loop {
        match session.run() {
            Ok(SessionOutcome::Exited) => return ExitCode::SUCCESS,
            Ok(SessionOutcome::OracleDone) => {
                eprintln!("oracle has no move for this position; session over");
                return ExitCode::SUCCESS;
            }
            // Turn-fatal errors leave the board intact; report and let
            // the operator retry the turn or type exit.
            Err(e) => {
                eprintln!("error: {e}");
            }
        }
    }
}
