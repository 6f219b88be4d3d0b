use super::board::Cell;

/// One of the two sides. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The player to move on a given turn, counting from zero.
    pub fn for_turn(turn: usize) -> Player {
        if turn % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::X.other(), Player::O);
        assert_eq!(Player::O.other(), Player::X);
    }

    #[test]
    fn test_turn_parity() {
        assert_eq!(Player::for_turn(0), Player::X);
        assert_eq!(Player::for_turn(1), Player::O);
        assert_eq!(Player::for_turn(40), Player::X);
    }

    #[test]
    fn test_player_cell() {
        assert_eq!(Player::X.to_cell(), Cell::X);
        assert_eq!(Player::O.to_cell(), Cell::O);
    }
}
