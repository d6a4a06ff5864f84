//! Fixed-depth negamax with alpha-beta pruning
//!
//! Every root move gets its own full-window child search. Root moves that
//! tie for the best score are collected and one is drawn at random, so
//! identical positions do not always produce identical games.

use super::ordering::order_moves;
use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::{Move, Position};
use crate::eval::{self, CHECKMATE_SCORE};
use crate::rng::Pcg32;

/// Outcome of a root search before the random tie-break
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResult {
    /// Root moves sharing the best score, in search order
    pub best_moves: Vec<Move>,
    pub score: i32,
}

/// Main search engine
#[derive(Debug, Default)]
pub struct Search {
    params: SearchParams,
    stats: SearchStats,
}

impl Search {
    /// Search with default parameters
    pub fn new() -> Self {
        Self::with_params(SearchParams::default())
    }

    pub fn with_params(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick a move for the side to move.
    ///
    /// Returns None only when nothing could be chosen, which is logged as
    /// an error when the position still had legal moves.
    pub fn best_move(&mut self, pos: &Position, rng: &mut Pcg32) -> Option<Move> {
        let root = self.search_root(pos);
        if root.best_moves.is_empty() {
            if !pos.legal_moves().is_empty() {
                log::error!("best_move: no move found (this should never happen) in {}", pos.to_fen());
            }
            return None;
        }
        let pick = rng.ranged(root.best_moves.len() as u32) as usize;
        let mv = root.best_moves[pick];
        log::debug!(
            "best_move {} score {} ({} tied) {}",
            mv,
            root.score,
            root.best_moves.len(),
            self.stats
        );
        Some(mv)
    }

    /// Score every root move and collect the ones tied for best
    pub fn search_root(&mut self, pos: &Position) -> RootResult {
        self.stats.reset();
        self.stats.start_timing();

        let mut moves = pos.legal_moves();
        if self.params.enable_ordering {
            order_moves(pos, &mut moves);
        }

        let depth = self.params.depth;
        let mut alpha = CHECKMATE_SCORE;
        let mut best_moves = Vec::new();
        for mv in moves {
            self.stats.inc_root_node();
            let child = pos.after(mv);
            let score = -self.negamax(&child, depth, CHECKMATE_SCORE, -(alpha - 1));
            log::trace!("root {} score {}", mv, score);
            if score > alpha {
                alpha = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == alpha {
                best_moves.push(mv);
            }
        }

        self.stats.update_timing();
        RootResult {
            best_moves,
            score: alpha,
        }
    }

    /// Fail-hard negamax: the result is clamped to `[alpha, beta]`
    pub fn negamax(&mut self, pos: &Position, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.stats.inc_node();
        if depth == 0 {
            self.stats.inc_leaf_eval();
            return eval::evaluate(pos);
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            return eval::terminal_score(pos);
        }
        if self.params.enable_ordering {
            order_moves(pos, &mut moves);
        }

        for mv in moves {
            let child = pos.after(mv);
            let score = -self.negamax(&child, depth - 1, -beta, -alpha);
            if score >= beta {
                self.stats.inc_cutoff();
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
