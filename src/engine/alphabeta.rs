use log::{info, trace};

use super::{eval::evaluate, Engine, SearchConfig};
use crate::{GameState, Position, Side};

/// Lower end of the initial search window.
pub const SCORE_MIN: i32 = -100_000;
/// Upper end of the initial search window.
pub const SCORE_MAX: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<(Position, Position)>,
    pub score: i32,
}

impl SearchResult {
    fn new(best_move: Option<(Position, Position)>, score: i32) -> Self {
        SearchResult { best_move, score }
    }

    fn score(score: i32) -> Self {
        SearchResult {
            best_move: None,
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// positions visited, the root included
    pub nodes: u64,
    /// positions scored by the evaluator
    pub leaves: u64,
    /// sibling lists cut short by alpha-beta
    pub cutoffs: u64,
}

struct Search {
    evaluating_side: Side,
    pruning: bool,
    stats: SearchStats,
}

impl Search {
    fn new(evaluating_side: Side, pruning: bool) -> Self {
        Search {
            evaluating_side,
            pruning,
            stats: SearchStats::default(),
        }
    }

    fn search_recursive(
        &mut self,
        state: &mut GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if depth == 0 {
            return self.leaf(state);
        }

        let moves = state.legal_moves();
        // checkmate and stalemate are scored like any other leaf
        if moves.is_empty() {
            return self.leaf(state);
        }

        let mut best = if maximizing {
            SearchResult::score(i32::MIN)
        } else {
            SearchResult::score(i32::MAX)
        };

        for (from, to) in moves {
            let score = {
                let mut child = state.scoped_move(from, to);
                self.search_recursive(&mut child, depth - 1, alpha, beta, !maximizing)
                    .score
            };

            if maximizing {
                if score > best.score {
                    best = SearchResult::new(Some((from, to)), score);
                }
                alpha = alpha.max(score);
            } else {
                if score < best.score {
                    best = SearchResult::new(Some((from, to)), score);
                }
                beta = beta.min(score);
            }

            if self.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                trace!("cutoff at depth {depth} after {from} -> {to} ({alpha} >= {beta})");
                break;
            }
        }

        best
    }

    fn leaf(&mut self, state: &GameState) -> SearchResult {
        self.stats.leaves += 1;
        SearchResult::score(evaluate(state, self.evaluating_side))
    }
}

/// Minimax with alpha-beta pruning, scoring positions for `evaluating_side`.
///
/// `maximizing` says whether the side to move in `state` is the one trying to
/// raise the score. Every move tried is taken back again, so `state` is
/// unchanged when this returns. `best_move` is `None` at depth 0 and when the
/// side to move has no legal move.
pub fn search(
    state: &mut GameState,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    evaluating_side: Side,
) -> SearchResult {
    search_with_stats(state, depth, alpha, beta, maximizing, evaluating_side).0
}

fn search_with_stats(
    state: &mut GameState,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    evaluating_side: Side,
) -> (SearchResult, SearchStats) {
    let mut search = Search::new(evaluating_side, true);
    let result = search.search_recursive(state, depth, alpha, beta, maximizing);
    (result, search.stats)
}

/// Plain minimax over the same tree and in the same order as [search], without pruning.
pub fn search_exhaustive(
    state: &mut GameState,
    depth: u32,
    maximizing: bool,
    evaluating_side: Side,
) -> SearchResult {
    let mut search = Search::new(evaluating_side, false);
    search.search_recursive(state, depth, SCORE_MIN, SCORE_MAX, maximizing)
}

/// Picks a move for the side to move in `state` with a full-window [search].
pub fn choose_move(
    state: &mut GameState,
    depth: u32,
    evaluating_side: Side,
    maximizing: bool,
) -> Option<(Position, Position)> {
    search(state, depth, SCORE_MIN, SCORE_MAX, maximizing, evaluating_side).best_move
}

/// [Engine] searching a fixed number of plies for the side to move.
pub struct AlphaBeta {
    config: SearchConfig,
    last_result: Option<SearchResult>,
    last_stats: Option<SearchStats>,
}

impl AlphaBeta {
    pub fn new(config: SearchConfig) -> Self {
        AlphaBeta {
            config,
            last_result: None,
            last_stats: None,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// statistics of the most recent search, `None` before the first one
    pub fn stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    /// score of the most recent search from the searching side's view
    pub fn current_score(&self) -> Option<i32> {
        self.last_result.map(|result| result.score)
    }
}

impl Default for AlphaBeta {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for AlphaBeta {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn choose_move(&mut self, state: &mut GameState) -> Option<(Position, Position)> {
        let side = state.side_to_move();
        let depth = self.config.depth.max(1);
        let (result, stats) = search_with_stats(state, depth, SCORE_MIN, SCORE_MAX, true, side);

        match result.best_move {
            Some((from, to)) => info!(
                "{side} plays {from} -> {to} (score {}, depth {depth}, {} nodes, {} cutoffs)",
                result.score, stats.nodes, stats.cutoffs
            ),
            None => info!("{side} has no legal move"),
        }

        self.last_result = Some(result);
        self.last_stats = Some(stats);
        result.best_move
    }
}
