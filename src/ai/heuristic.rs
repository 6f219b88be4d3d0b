use crate::game::{Board, Geometry, Player, Window};

/// Search and evaluation scores.
pub type Score = i32;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> Score;
}

/// Weights used by [`WindowHeuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Per own piece in the center column.
    pub center_own: Score,
    /// Per opponent piece in the center column.
    pub center_opponent: Score,
    pub own_four: Score,
    pub own_three: Score,
    pub own_two: Score,
    pub opponent_three: Score,
    pub opponent_two: Score,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            center_own: 5,
            center_opponent: -4,
            own_four: 100_000,
            own_three: 50,
            own_two: 10,
            opponent_three: -70,
            opponent_two: -5,
        }
    }
}

impl HeuristicWeights {
    /// Largest magnitude [`WindowHeuristic::evaluate`] can produce on a board
    /// of the given size. `own_four` only fires on a completed line, so it is
    /// counted only when `with_fours` is set; the search scores won positions
    /// before evaluating them.
    pub fn max_evaluation(&self, geometry: Geometry, with_fours: bool) -> i64 {
        let abs = |w: Score| i64::from(w).abs();
        let own = if with_fours {
            abs(self.own_four).max(abs(self.own_three)).max(abs(self.own_two))
        } else {
            abs(self.own_three).max(abs(self.own_two))
        };
        let opponent = abs(self.opponent_three).max(abs(self.opponent_two));
        let center = abs(self.center_own).max(abs(self.center_opponent));

        geometry.window_count() as i64 * (own + opponent) + geometry.rows as i64 * center
    }
}

/// Default heuristic: a center column bonus plus a score for every 4-cell
/// window. Opponent threats weigh more than own progress, so
/// `evaluate(b, X)` is not the negation of `evaluate(b, O)`.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    weights: HeuristicWeights,
}

impl WindowHeuristic {
    pub fn new(weights: HeuristicWeights) -> Self {
        WindowHeuristic { weights }
    }

    fn score_window(&self, own: usize, opp: usize, empty: usize) -> Score {
        let w = &self.weights;
        let mut score = if own == 4 {
            w.own_four
        } else if own == 3 && empty == 1 {
            w.own_three
        } else if own == 2 && empty == 2 {
            w.own_two
        } else {
            0
        };

        if opp == 3 && empty == 1 {
            score = score.saturating_add(w.opponent_three);
        } else if opp == 2 && empty == 2 {
            score = score.saturating_add(w.opponent_two);
        }
        score
    }

    fn count(board: &Board, window: &Window, player: Player) -> (usize, usize, usize) {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let (mut own, mut opp, mut empty) = (0, 0, 0);
        for &(row, col) in window {
            match board.get(row, col) {
                c if c == own_cell => own += 1,
                c if c == opp_cell => opp += 1,
                _ => empty += 1,
            }
        }
        (own, opp, empty)
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> Score {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score: Score = 0;

        // Center column bonus
        let center = board.center_col();
        for row in 0..board.rows() {
            let cell = board.get(row, center);
            if cell == own_cell {
                score = score.saturating_add(self.weights.center_own);
            } else if cell == opp_cell {
                score = score.saturating_add(self.weights.center_opponent);
            }
        }

        for window in board.windows() {
            let (own, opp, empty) = Self::count(board, &window, player);
            score = score.saturating_add(self.score_window(own, opp, empty));
        }

        score
    }
}
