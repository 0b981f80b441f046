//! The UCI protocol loop.

pub mod command;
pub mod report;

use std::fmt;
use std::io::{self, BufRead};
use std::time::Instant;

use crate::board::{attack_tables, FenError, GameState, MoveParseError};
use crate::engine::Engine;
use crate::perft::perft;

use command::UciCommand;

/// Failure while handling a `position` command.
#[derive(Debug, Clone)]
pub enum UciError {
    InvalidFen(FenError),
    InvalidMove {
        move_str: String,
        error: MoveParseError,
    },
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "position command is incomplete"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Resolve a `position` command into a fresh game state.
///
/// Handles `position startpos [moves …]`, `position fen <6 fields>
/// [moves …]`, and the bare `position moves …` extension that applies
/// moves to the current state.
pub fn parse_position_command(
    current: &GameState,
    parts: &[String],
) -> Result<GameState, UciError> {
    let mut i = 1;
    let mut state = match parts.get(i).map(String::as_str) {
        Some("startpos") => {
            i += 1;
            GameState::new()
        }
        Some("fen") => {
            if parts.len() < i + 7 {
                return Err(UciError::MissingParts);
            }
            let fen = parts[i + 1..i + 7].join(" ");
            i += 7;
            GameState::from_fen(&fen)?
        }
        Some("moves") => current.clone(),
        _ => return Err(UciError::MissingParts),
    };

    if parts.get(i).map(String::as_str) == Some("moves") {
        for token in &parts[i + 1..] {
            state
                .make_move_uci(token)
                .map_err(|error| UciError::InvalidMove {
                    move_str: token.clone(),
                    error,
                })?;
        }
    }

    Ok(state)
}

/// Read commands from stdin until `quit` or end of input.
pub fn run(engine: &mut Engine) -> io::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some(cmd) = command::parse_command(&line) else {
            continue;
        };

        match cmd {
            UciCommand::Uci => {
                println!("id name Ember {}", env!("CARGO_PKG_VERSION"));
                println!("id author Ember contributors");
                println!("uciok");
            }
            UciCommand::IsReady => {
                attack_tables::initialize();
                println!("readyok");
            }
            UciCommand::Debug(arg) => match arg.as_deref() {
                Some("on" | "off") => {}
                other => eprintln!("error: debug expects on|off, got {other:?}"),
            },
            UciCommand::SetOption(_) => {
                eprintln!("error: no options are defined");
            }
            UciCommand::Register | UciCommand::UciNewGame => {}
            UciCommand::Position(parts) => {
                match parse_position_command(engine.state(), &parts) {
                    Ok(state) => engine.set_state(state),
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            UciCommand::Go(parts) => {
                let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
                let limits = command::parse_go_params(&refs).to_limits(engine.state());
                engine.go(limits, report::print_outcome);
            }
            UciCommand::Perft(depth) => {
                let mut state = engine.state().clone();
                let start = Instant::now();
                let nodes = perft(&mut state, depth);
                println!(
                    "info string perft depth {depth} nodes {nodes} time {}",
                    start.elapsed().as_millis()
                );
            }
            UciCommand::Stop => {
                // Joining the workers lets the search thread print its
                // bestmove before the next command is read.
                engine.stop_search();
            }
            UciCommand::PonderHit => {
                engine.ponderhit(report::print_outcome);
            }
            UciCommand::Quit => break,
            UciCommand::Unknown(token) => {
                eprintln!("error: unknown command '{token}'");
            }
        }
    }
    Ok(())
}
