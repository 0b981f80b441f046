//! Formatting for engine output lines.

use crate::board::Move;
use crate::search::{SearchError, SearchInfo};

/// One progress line: score in truncated centipawns, completed depth,
/// node and time counters, and the current PV.
pub(crate) fn format_info(info: &SearchInfo) -> String {
    let cp = (info.score() * 100.0) as i64;
    let pv = info
        .pv()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "info score cp {} depth {} nodes {} time {} pv {}",
        cp,
        info.depth(),
        info.nodes(),
        info.time_ms(),
        pv
    )
}

pub(crate) fn print_info(info: &SearchInfo) {
    println!("{}", format_info(info));
}

/// Report the outcome of a `go`: the best move, or the failure when
/// the search was stopped before producing one.
pub fn print_outcome(outcome: Result<(f64, Move), SearchError>) {
    match outcome {
        Ok((_, best)) => println!("bestmove {best}"),
        Err(e) => {
            eprintln!("error: {e}");
            println!("bestmove (none)");
        }
    }
}
