use super::{Board, GameResult, Geometry, Player, WinningLine};
use crate::error::{BoardError, MoveError};

/// A game in progress: the current board plus the turn counter. The player
/// to move is derived from turn parity and the result from the board.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    turn: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            turn: 0,
        }
    }

    /// Initial state on a board with custom dimensions.
    pub fn with_geometry(geometry: Geometry) -> Result<Self, BoardError> {
        Ok(GameState {
            board: Board::with_geometry(geometry)?,
            turn: 0,
        })
    }

    /// Resume from an arbitrary board at a given turn.
    pub fn from_board(board: Board, turn: usize) -> Self {
        GameState { board, turn }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        Player::for_turn(self.turn)
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> GameResult {
        self.board.outcome()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.detect_line()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Get list of legal columns (not full); empty once the game is over
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        Ok(GameState {
            board: self.board.apply_move(column, self.current_player())?,
            turn: self.turn + 1,
        })
    }

    /// Apply move mutably (for UI efficiency). Returns the row the piece
    /// landed in.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player())?;
        self.turn += 1;
        Ok(row)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::X);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::O);
        assert_eq!(new_state.turn(), 1);
        assert_eq!(new_state.board().get(5, 3), Cell::X);
        assert_eq!(state.board().get(5, 3), Cell::Empty);
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // X wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // X
            if col < 3 {
                state = state.apply_move(col).unwrap(); // O (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), GameResult::Win(Player::X));
        assert_eq!(
            state.winning_line().map(|line| line.cells),
            Some([(5, 0), (5, 1), (5, 2), (5, 3)])
        );
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_mutable_move_reports_row() {
        let mut state = GameState::initial();
        assert_eq!(state.apply_move_mut(2), Ok(5));
        assert_eq!(state.apply_move_mut(2), Ok(4));
        assert_eq!(state.board().get(4, 2), Cell::O);
        assert_eq!(state.current_player(), Player::X);
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut state = GameState::initial();
        assert_eq!(
            state.apply_move_mut(9),
            Err(MoveError::InvalidColumn { column: 9, cols: 7 })
        );
        assert_eq!(state.turn(), 0);
    }

    #[test]
    fn test_resume_from_board() {
        let board = Board::from_rows(&["...", "...", "X.."]).unwrap();
        let state = GameState::from_board(board, 1);
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.legal_actions(), vec![0, 1, 2]);
    }
}
