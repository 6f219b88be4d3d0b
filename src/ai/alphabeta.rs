use log::{debug, error};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use super::heuristic::{Heuristic, HeuristicWeights, Score, WindowHeuristic};
use crate::game::{Board, GameResult, GameState, Player};

/// Base score of a won position. The remaining depth is added on top so
/// that faster wins (and slower losses) are preferred.
pub const WIN_SCORE: Score = 1_000_000;

/// Outcome of a search from the root position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root has no legal move.
    pub column: Option<usize>,
    pub score: Score,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Legal moves ordered by distance from the center column, ties in
/// ascending column order. Center-first ordering makes cutoffs come earlier.
pub fn ordered_moves(board: &Board) -> Vec<usize> {
    let center = board.center_col();
    let mut moves = board.legal_moves();
    moves.sort_by_key(|&col| col.abs_diff(center));
    moves
}

/// Depth-limited minimax with alpha-beta pruning, scoring every position from
/// the point of view of the root player.
pub struct AlphaBeta {
    heuristic: Box<dyn Heuristic>,
    rng: StdRng,
    pruning: bool,
    nodes: u64,
}

impl AlphaBeta {
    pub fn new(heuristic: Box<dyn Heuristic>, rng: StdRng) -> Self {
        AlphaBeta {
            heuristic,
            rng,
            pruning: true,
            nodes: 0,
        }
    }

    /// Engine with the default heuristic and a reproducible tie-break RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            Box::new(WindowHeuristic::default()),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Engine with the given weights. Without a seed the RNG is seeded from
    /// the OS.
    pub fn with_weights(weights: HeuristicWeights, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(Box::new(WindowHeuristic::new(weights)), rng)
    }

    /// Turn pruning off to run plain minimax over the same tree.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Pick the best column for `player` looking `depth` plies ahead.
    pub fn search(&mut self, board: &Board, depth: u32, player: Player) -> SearchResult {
        self.nodes = 0;
        if board.legal_moves().is_empty() {
            return SearchResult {
                column: None,
                score: 0,
                nodes: 0,
            };
        }

        let (column, score) = self.search_node(board, depth, Score::MIN, Score::MAX, true, player);
        debug!(
            "search depth={} player={} pruning={} -> column={:?} score={} nodes={}",
            depth, player, self.pruning, column, score, self.nodes
        );
        SearchResult {
            column,
            score,
            nodes: self.nodes,
        }
    }

    fn search_node(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        player: Player,
    ) -> (Option<usize>, Score) {
        self.nodes += 1;

        match board.outcome() {
            GameResult::Win(winner) if winner == player => {
                return (None, WIN_SCORE + depth as Score)
            }
            GameResult::Win(_) => return (None, -WIN_SCORE - depth as Score),
            GameResult::Draw => return (None, 0),
            GameResult::Ongoing => {}
        }

        if depth == 0 {
            return (None, self.heuristic.evaluate(board, player));
        }

        let moves = ordered_moves(board);
        // Placeholder until a child improves on it.
        let mut best_move = moves.choose(&mut self.rng).copied();
        let mut best = if maximizing { Score::MIN } else { Score::MAX };
        let mover = if maximizing { player } else { player.other() };

        for &col in &moves {
            let child = match board.apply_move(col, mover) {
                Ok(child) => child,
                Err(err) => {
                    error!("legal move {col} rejected: {err}");
                    debug_assert!(false, "legal move {col} rejected: {err}");
                    continue;
                }
            };
            let (_, score) = self.search_node(&child, depth - 1, alpha, beta, !maximizing, player);

            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(col);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(col);
                }
                beta = beta.min(best);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        (best_move, best)
    }
}

/// Agent that plays the alpha-beta engine's choice at a fixed depth.
pub struct AlphaBetaAgent {
    engine: AlphaBeta,
    depth: u32,
    last_search: Option<SearchResult>,
}

impl AlphaBetaAgent {
    pub fn new(engine: AlphaBeta, depth: u32) -> Self {
        AlphaBetaAgent {
            engine,
            depth,
            last_search: None,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Result of the most recent search, if any.
    pub fn last_search(&self) -> Option<SearchResult> {
        self.last_search
    }
}

impl Agent for AlphaBetaAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let result = self
            .engine
            .search(state.board(), self.depth, state.current_player());
        self.last_search = Some(result);
        result.column
    }

    fn name(&self) -> &str {
        "Alpha-Beta"
    }
}
