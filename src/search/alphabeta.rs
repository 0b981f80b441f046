//! Iterative-deepening negamax with alpha-beta pruning and a
//! capture-only quiescence extension.

use std::sync::atomic::{AtomicBool, Ordering};

use super::ordering::order_moves;
use super::{SearchError, SearchInfo, SearchLimits, SearchResult, Searcher, MATE_SCORE};
use crate::board::{GameState, Move};
use crate::eval::{Evaluator, MaterialEvaluator};

/// Alpha-beta searcher over a pluggable evaluator.
pub struct AlphaBetaSearcher<E> {
    evaluator: E,
}

impl AlphaBetaSearcher<MaterialEvaluator> {
    #[must_use]
    pub fn new() -> Self {
        AlphaBetaSearcher {
            evaluator: MaterialEvaluator,
        }
    }
}

impl Default for AlphaBetaSearcher<MaterialEvaluator> {
    fn default() -> Self {
        AlphaBetaSearcher::new()
    }
}

impl<E: Evaluator> AlphaBetaSearcher<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        AlphaBetaSearcher { evaluator }
    }
}

impl<E: Evaluator> Searcher for AlphaBetaSearcher<E> {
    fn initialize(&mut self, state: &mut GameState) {
        self.evaluator.initialize(state);
    }

    fn search(
        &mut self,
        state: &mut GameState,
        limits: &SearchLimits,
        info: &SearchInfo,
        stop: &AtomicBool,
    ) -> Result<(f64, Move), SearchError> {
        let all_moves = state.generate_moves();
        let root_moves: Vec<Move> = if limits.searchmoves.is_empty() {
            all_moves
        } else {
            all_moves
                .into_iter()
                .filter(|m| limits.searchmoves.contains(m))
                .collect()
        };
        if root_moves.is_empty() {
            return Err(SearchError::NoMoveFound);
        }

        let white_to_move = state.whites_move();
        let mut ctx = SearchContext {
            state,
            evaluator: &mut self.evaluator,
            info,
            stop,
            max_nodes: limits.max_nodes.unwrap_or(u64::MAX),
        };

        // Best root move and score so far, from the side to move's
        // point of view. Updated as soon as a root move finishes so a
        // stop mid-iteration still reports something sensible.
        let mut best: Option<(Move, f64)> = None;

        'deepening: for depth in 1..=limits.effective_depth() {
            let previous_pv = info.pv();
            let mut iteration_best: Option<(Move, f64, Vec<Move>)> = None;

            let mut queue = order_moves(
                root_moves.clone(),
                ctx.state.pos(),
                previous_pv.first().copied(),
            );
            while let Some(ranked) = queue.pop() {
                if ctx.stopped() {
                    break 'deepening;
                }
                let m = ranked.mv;
                let child_pv = pv_after(&previous_pv, m);
                let beta = match &iteration_best {
                    Some((_, score, _)) => -*score,
                    None => f64::INFINITY,
                };

                ctx.state.make_move(m);
                let child = ctx.alpha_beta(depth - 1, f64::NEG_INFINITY, beta, false, child_pv);
                ctx.state.undo_move();
                if ctx.stopped() {
                    // The interrupted subtree's score is unreliable.
                    break 'deepening;
                }

                let score = -child.score;
                let improved = match &iteration_best {
                    Some((_, prev, _)) => score > *prev,
                    None => true,
                };
                if improved {
                    let mut pv = Vec::with_capacity(child.pv.len() + 1);
                    pv.push(m);
                    pv.extend(child.pv);
                    iteration_best = Some((m, score, pv));
                    best = Some((m, score));
                }
            }

            // The iteration ran to completion: commit its PV. This is
            // the only place the published PV changes, once per depth.
            if let Some((m, score, pv)) = iteration_best {
                best = Some((m, score));
                info.set_depth(depth);
                info.set_score(if white_to_move { score } else { -score });
                info.set_pv(pv);
            }
        }

        match best {
            Some((m, score)) => {
                let white_score = if white_to_move { score } else { -score };
                Ok((white_score, m))
            }
            None => Err(SearchError::NoMoveFound),
        }
    }
}

/// The tail of `pv` below `m`, when `m` is the PV move at this node.
fn pv_after(pv: &[Move], m: Move) -> &[Move] {
    match pv.split_first() {
        Some((head, tail)) if *head == m => tail,
        _ => &[],
    }
}

struct SearchContext<'a, E> {
    state: &'a mut GameState,
    evaluator: &'a mut E,
    info: &'a SearchInfo,
    stop: &'a AtomicBool,
    max_nodes: u64,
}

impl<E: Evaluator> SearchContext<'_, E> {
    #[inline]
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Static evaluation from the side to move's point of view.
    fn static_eval(&mut self) -> f64 {
        let score = self.evaluator.evaluate(self.state);
        if self.state.whites_move() {
            score
        } else {
            -score
        }
    }

    /// Negamax with fail-hard alpha-beta bounds.
    ///
    /// At depth zero the node re-enters in quiescence mode, where only
    /// captures are searched; a quiescence node with no captures to
    /// try answers with the static evaluation. Checkmate scores a
    /// flat `-MATE_SCORE`, stalemate zero.
    fn alpha_beta(
        &mut self,
        depth: u32,
        alpha: f64,
        beta: f64,
        quiescence: bool,
        pv: &[Move],
    ) -> SearchResult {
        if self.stopped() {
            // Unwind quickly; the caller discards this score.
            return SearchResult {
                score: alpha,
                pv: Vec::new(),
            };
        }
        if self.info.count_node() > self.max_nodes {
            self.stop.store(true, Ordering::Relaxed);
            return SearchResult {
                score: alpha,
                pv: Vec::new(),
            };
        }

        if depth == 0 && !quiescence {
            return self.alpha_beta(0, alpha, beta, true, pv);
        }

        let moves = self.state.generate_moves();
        if moves.is_empty() {
            let score = if self.state.pos().in_check(self.state.side_to_move()) {
                -MATE_SCORE
            } else {
                0.0
            };
            return SearchResult {
                score,
                pv: Vec::new(),
            };
        }

        let mut queue = order_moves(moves, self.state.pos(), pv.first().copied());
        let mut alpha = alpha;
        let mut line = Vec::new();
        let mut tried_capture = false;

        while let Some(ranked) = queue.pop() {
            let m = ranked.mv;
            if quiescence && !m.is_capture() {
                continue;
            }
            tried_capture |= quiescence;

            let child_pv = pv_after(pv, m);
            self.state.make_move(m);
            let child =
                self.alpha_beta(depth.saturating_sub(1), -beta, -alpha, quiescence, child_pv);
            self.state.undo_move();

            let score = -child.score;
            if score >= beta {
                return SearchResult {
                    score: beta,
                    pv: Vec::new(),
                };
            }
            if score > alpha {
                alpha = score;
                line.clear();
                line.push(m);
                line.extend(child.pv);
            }
        }

        if quiescence && !tried_capture {
            return SearchResult {
                score: self.static_eval(),
                pv: Vec::new(),
            };
        }

        SearchResult {
            score: alpha,
            pv: line,
        }
    }
}
