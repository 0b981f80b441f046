//! UCI command tokenization and `go` parameter parsing.

use crate::board::GameState;
use crate::search::SearchLimits;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    Debug(Option<String>),
    SetOption(Vec<String>),
    Register,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    Stop,
    PonderHit,
    Quit,
    Unknown(String),
}

/// Tokenize one input line. Returns `None` for blank lines.
#[must_use]
pub fn parse_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first = parts.first()?;

    let owned = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<_>>();

    let cmd = match *first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "debug" => UciCommand::Debug(parts.get(1).map(|p| (*p).to_string())),
        "setoption" => UciCommand::SetOption(owned()),
        "register" => UciCommand::Register,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned()),
        "go" => UciCommand::Go(owned()),
        "perft" => {
            let depth = parts.get(1).and_then(|p| p.parse().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "stop" => UciCommand::Stop,
        "ponderhit" => UciCommand::PonderHit,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown((*first).to_string()),
    };
    Some(cmd)
}

/// Raw `go` sub-tokens. Clock fields are accepted for protocol
/// compatibility but never consulted by the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub movetime: Option<u64>,
    pub nodes: Option<u64>,
    pub depth: Option<u32>,
    pub mate: Option<u32>,
    pub searchmoves: Vec<String>,
    pub ponder: bool,
    pub infinite: bool,
}

const GO_KEYWORDS: [&str; 12] = [
    "wtime",
    "btime",
    "winc",
    "binc",
    "movestogo",
    "movetime",
    "nodes",
    "depth",
    "mate",
    "searchmoves",
    "ponder",
    "infinite",
];

fn parse_next<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse().ok())
}

#[must_use]
pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < parts.len() {
        let consumed = match parts[i] {
            "wtime" => {
                params.wtime = parse_next(parts, i);
                2
            }
            "btime" => {
                params.btime = parse_next(parts, i);
                2
            }
            "winc" => {
                params.winc = parse_next(parts, i);
                2
            }
            "binc" => {
                params.binc = parse_next(parts, i);
                2
            }
            "movestogo" => {
                params.movestogo = parse_next(parts, i);
                2
            }
            "movetime" => {
                params.movetime = parse_next(parts, i);
                2
            }
            "nodes" => {
                params.nodes = parse_next(parts, i);
                2
            }
            "depth" => {
                params.depth = parse_next(parts, i);
                2
            }
            "mate" => {
                params.mate = parse_next(parts, i);
                2
            }
            "searchmoves" => {
                let mut j = i + 1;
                while j < parts.len() && !GO_KEYWORDS.contains(&parts[j]) {
                    params.searchmoves.push(parts[j].to_string());
                    j += 1;
                }
                j - i
            }
            "ponder" => {
                params.ponder = true;
                1
            }
            "infinite" => {
                params.infinite = true;
                1
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

impl GoParams {
    /// Convert to `SearchLimits`, resolving `searchmoves` tokens
    /// against the legal moves of `state`. Tokens that do not name a
    /// legal move are dropped. Clock fields are intentionally ignored;
    /// only `movetime` feeds the governor's budget.
    #[must_use]
    pub fn to_limits(&self, state: &GameState) -> SearchLimits {
        let searchmoves = self
            .searchmoves
            .iter()
            .filter_map(|token| state.parse_move(token).ok())
            .collect();

        SearchLimits {
            movetime_ms: self.movetime,
            max_nodes: self.nodes,
            max_depth: self.depth,
            mate_in: self.mate,
            searchmoves,
            ponder: self.ponder,
            infinite: self.infinite,
        }
    }
}
