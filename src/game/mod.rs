//! Core Connect Four game logic: board representation, player types, and the
//! caller-side game session with immutable transitions.

mod board;
mod player;
mod state;

pub use board::{
    Board, Cell, Coord, GameResult, Geometry, Window, WinningLine, COLS, LINE, MAX_DIMENSION,
    ROWS,
};
pub use player::Player;
pub use state::GameState;
