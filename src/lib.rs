//! Ember: a UCI chess engine.
//!
//! The playing brain is a magic-bitboard move generator driving an
//! iterative-deepening alpha-beta search, governed by a concurrent
//! time/node/depth watchdog. The crate exposes the pieces separately:
//!
//! ```
//! use ember::board::GameState;
//! use ember::search::{AlphaBetaSearcher, SearchInfo, SearchLimits, Searcher};
//! use std::sync::atomic::AtomicBool;
//!
//! let mut state = GameState::new();
//! let limits = SearchLimits { max_depth: Some(2), ..SearchLimits::default() };
//! let info = SearchInfo::new();
//! let stop = AtomicBool::new(false);
//!
//! let mut searcher = AlphaBetaSearcher::new();
//! let (score, best) = searcher.search(&mut state, &limits, &info, &stop).unwrap();
//! println!("{best} scores {score:.2}");
//! ```
//!
//! Positions come and go through FEN:
//!
//! ```
//! use ember::board::GameState;
//!
//! let mut state = GameState::from_fen(
//!     "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
//! ).unwrap();
//! assert_eq!(state.generate_moves().len(), 48);
//! state.make_move_uci("e2a6").unwrap();
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod perft;
pub mod search;
pub mod sync;
pub mod uci;
