//! Engine controller: owns the game state and the per-`go` worker pair.

mod governor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::board::{GameState, Move};
use crate::search::{
    AlphaBetaSearcher, SearchError, SearchInfo, SearchLimits, Searcher,
};
use crate::sync::StopFlag;

/// Poll interval while a finished ponder search waits for `ponderhit`.
const PONDER_POLL_MS: u64 = 10;

type SearchOutcome = Result<(f64, Move), SearchError>;

/// The two concurrent tasks serving one `go` command.
struct SearchJob {
    stop: StopFlag,
    pondering: Arc<AtomicBool>,
    worker: JoinHandle<()>,
    governor: JoinHandle<()>,
}

impl SearchJob {
    fn signal_stop(&self) {
        self.pondering.store(false, Ordering::Relaxed);
        self.stop.stop();
    }

    fn stop_and_wait(self) {
        self.signal_stop();
        let _ = self.worker.join();
        let _ = self.governor.join();
    }
}

/// Drives searches for the UCI loop: one authoritative `GameState`,
/// one searcher, and at most one active search job. The worker owns a
/// clone of the state for the duration of the search; the governor
/// shares only the stop flag and the `SearchInfo` record.
pub struct Engine {
    state: GameState,
    searcher: Arc<Mutex<Box<dyn Searcher + Send>>>,
    job: Option<SearchJob>,
    ponder_move: Arc<Mutex<Option<Move>>>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Engine::with_searcher(Box::new(AlphaBetaSearcher::new()))
    }

    #[must_use]
    pub fn with_searcher(searcher: Box<dyn Searcher + Send>) -> Self {
        Engine {
            state: GameState::new(),
            searcher: Arc::new(Mutex::new(searcher)),
            job: None,
            ponder_move: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the game state, stopping any running search first.
    pub fn set_state(&mut self, state: GameState) {
        self.stop_search();
        self.state = state;
    }

    /// Mutable access to the state, stopping any running search first.
    pub fn state_mut(&mut self) -> &mut GameState {
        self.stop_search();
        &mut self.state
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.job.is_some()
    }

    /// Start the search worker and the governor for one `go` command.
    ///
    /// `on_complete` runs on the worker thread once the search returns
    /// and any ponder wait has resolved; it receives the search
    /// outcome, typically to print `bestmove`.
    pub fn go<F>(&mut self, limits: SearchLimits, on_complete: F)
    where
        F: FnOnce(SearchOutcome) + Send + 'static,
    {
        self.stop_search();

        let stop = StopFlag::new();
        let info = Arc::new(SearchInfo::new());
        let pondering = Arc::new(AtomicBool::new(limits.ponder));

        let timeout_ms = if limits.ponder || limits.infinite {
            None
        } else {
            limits.movetime_ms
        };

        let governor = {
            let info = Arc::clone(&info);
            let stop = stop.clone();
            thread::Builder::new()
                .name("governor".to_string())
                .spawn(move || governor::run(info, timeout_ms, stop))
                .expect("failed to spawn governor thread")
        };

        let worker = {
            let mut state = self.state.clone();
            let searcher = Arc::clone(&self.searcher);
            let stop = stop.clone();
            let info = Arc::clone(&info);
            let pondering = Arc::clone(&pondering);
            let ponder_slot = Arc::clone(&self.ponder_move);
            thread::Builder::new()
                .name("search".to_string())
                .spawn(move || {
                    let result = searcher
                        .lock()
                        .search(&mut state, &limits, &info, stop.as_atomic());

                    // A finished ponder search holds its answer until
                    // the GUI resolves the ponder with stop/ponderhit.
                    while pondering.load(Ordering::Relaxed) && !stop.is_stopped() {
                        thread::sleep(Duration::from_millis(PONDER_POLL_MS));
                    }
                    stop.stop();

                    *ponder_slot.lock() = info.pv().get(1).copied();
                    on_complete(result);
                })
                .expect("failed to spawn search thread")
        };

        self.job = Some(SearchJob {
            stop,
            pondering,
            worker,
            governor,
        });
    }

    /// Raise the stop flag and join both workers. The worker's
    /// completion callback fires before this returns.
    pub fn stop_search(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop_and_wait();
        }
    }

    /// The expected reply stored by the last completed search.
    #[must_use]
    pub fn ponder_move(&self) -> Option<Move> {
        *self.ponder_move.lock()
    }

    /// `ponderhit`: end the ponder search, play the stored ponder move
    /// when it is legal in the current position, and search again
    /// without limits.
    pub fn ponderhit<F>(&mut self, on_complete: F)
    where
        F: FnOnce(SearchOutcome) + Send + 'static,
    {
        self.stop_search();
        if let Some(mv) = self.ponder_move.lock().take() {
            if self.state.generate_moves().contains(&mv) {
                self.state.make_move(mv);
            }
        }
        self.go(SearchLimits::default(), on_complete);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop_search();
    }
}
