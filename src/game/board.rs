use std::fmt;

use super::player::Player;
use crate::error::{BoardError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of pieces in a winning line.
pub const LINE: usize = 4;

/// Largest supported row or column count.
pub const MAX_DIMENSION: usize = 16;

/// A `(row, col)` position. Row 0 is the top of the board.
pub type Coord = (usize, usize);

/// `LINE` consecutive coordinates along one direction.
pub type Window = [Coord; LINE];

/// Scan directions as `(row step, col step)`: horizontal, vertical,
/// diagonal and anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
}

impl Geometry {
    pub fn new(rows: usize, cols: usize) -> Self {
        Geometry { rows, cols }
    }

    pub fn is_supported(&self) -> bool {
        (1..=MAX_DIMENSION).contains(&self.rows) && (1..=MAX_DIMENSION).contains(&self.cols)
    }

    /// Number of length-[`LINE`] windows a board of this size has, as
    /// yielded by [`Board::windows`].
    pub fn window_count(&self) -> usize {
        let row_starts = (self.rows + 1).saturating_sub(LINE);
        let col_starts = (self.cols + 1).saturating_sub(LINE);
        self.rows * col_starts + row_starts * self.cols + 2 * row_starts * col_starts
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Result of a position, always derived from the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Four same-colored pieces in a row and who owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub cells: Window,
}

impl WinningLine {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// A snapshot of the grid. Moves produce new boards through
/// [`Board::apply_move`]; the gravity invariant (no empty cell below a piece)
/// holds for every board this type hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
        }
    }

    /// Create an empty board with custom dimensions.
    pub fn with_geometry(geometry: Geometry) -> Result<Self, BoardError> {
        if !geometry.is_supported() {
            return Err(BoardError::Geometry {
                rows: geometry.rows,
                cols: geometry.cols,
            });
        }
        Ok(Board {
            rows: geometry.rows,
            cols: geometry.cols,
            cells: vec![Cell::Empty; geometry.rows * geometry.cols],
        })
    }

    /// Parse a board from its rows, top row first. `.` is empty, `X`/`O`
    /// are pieces and whitespace is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let cols = parsed.first().map_or(0, Vec::len);
        let mut board = Board::with_geometry(Geometry::new(parsed.len(), cols))?;

        for (row, symbols) in parsed.iter().enumerate() {
            if symbols.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    found: symbols.len(),
                    expected: cols,
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = match symbol {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::X,
                    'O' | 'o' => Cell::O,
                    _ => return Err(BoardError::UnknownSymbol { symbol, row, col }),
                };
                board.cells[row * cols + col] = cell;
            }
        }

        for row in 0..board.rows - 1 {
            for col in 0..board.cols {
                if board.get(row, col) != Cell::Empty && board.get(row + 1, col) == Cell::Empty {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.rows, self.cols)
    }

    /// Index of the center column (the left one of the two middle columns on
    /// even widths).
    pub fn center_col(&self) -> usize {
        self.cols / 2
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, the last row is the bottom
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Find the lowest empty row in this column
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;
        self.cells[row * self.cols + col] = player.to_cell();
        Ok(row)
    }

    /// Return a new board with `player`'s piece dropped into `col`.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.drop_piece(col, player)?;
        Ok(next)
    }

    /// Every run of `LINE` cells on the board, origin cells in row-major
    /// order and directions in [`DIRECTIONS`] order for each origin.
    pub fn windows(&self) -> impl Iterator<Item = Window> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| {
            (0..cols).flat_map(move |col| {
                DIRECTIONS
                    .into_iter()
                    .filter_map(move |(dr, dc)| window_at(rows, cols, row, col, dr, dc))
            })
        })
    }

    /// The first complete line in [`Board::windows`] order. When a move
    /// completes several lines at once only the first is reported.
    pub fn detect_line(&self) -> Option<WinningLine> {
        self.windows().find_map(|window| {
            let (r, c) = window[0];
            let player = self.get(r, c).player()?;
            window
                .iter()
                .all(|&(r, c)| self.get(r, c) == player.to_cell())
                .then_some(WinningLine {
                    player,
                    cells: window,
                })
        })
    }

    pub fn outcome(&self) -> GameResult {
        if let Some(line) = self.detect_line() {
            GameResult::Win(line.player)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }
}

fn window_at(rows: usize, cols: usize, row: usize, col: usize, dr: isize, dc: isize) -> Option<Window> {
    let span = LINE as isize - 1;
    let end_row = row as isize + dr * span;
    let end_col = col as isize + dc * span;
    if end_row < 0 || end_row >= rows as isize || end_col < 0 || end_col >= cols as isize {
        return None;
    }

    let mut window = [(0, 0); LINE];
    for (i, coord) in window.iter_mut().enumerate() {
        let step = i as isize;
        *coord = (
            (row as isize + dr * step) as usize,
            (col as isize + dc * step) as usize,
        );
    }
    Some(window)
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
