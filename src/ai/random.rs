use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::GameState;

/// Plays a uniformly random open column. Used as a sparring partner for the
/// search engine and to generate test positions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Reproducible agent: the same seed plays the same columns.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        RandomAgent { rng }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        state.legal_actions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Geometry, Player};

    #[test]
    fn only_open_columns_are_played() {
        // Column 0 filled on a 2x3 board.
        let state = GameState::with_geometry(Geometry { rows: 2, cols: 3 })
            .unwrap()
            .apply_move(0)
            .unwrap()
            .apply_move(0)
            .unwrap();
        let mut agent = RandomAgent::seeded(7);
        for _ in 0..50 {
            let column = agent.select_action(&state).unwrap();
            assert!(column == 1 || column == 2, "played full column {column}");
        }
    }

    #[test]
    fn random_game_runs_to_the_end() {
        let mut x = RandomAgent::new();
        let mut o = RandomAgent::default();
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let agent = match state.current_player() {
                Player::X => &mut x,
                Player::O => &mut o,
            };
            let column = agent.select_action(&state).unwrap();
            state = state.apply_move(column).unwrap();
        }

        assert_eq!(x.select_action(&state), None);
        assert_eq!(x.name(), "Random");
    }

    #[test]
    fn equal_seeds_play_equal_columns() {
        let state = GameState::initial();
        let mut first = RandomAgent::seeded(11);
        let mut second = RandomAgent::seeded(11);
        for _ in 0..20 {
            assert_eq!(first.select_action(&state), second.select_action(&state));
        }
    }
}
