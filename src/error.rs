use std::path::PathBuf;

/// Errors returned when a move cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    /// Only produced by [`GameState`](crate::game::GameState); a bare board
    /// accepts moves until its columns fill up.
    #[error("the game is already over")]
    GameOver,
}

/// Errors produced when building a board from a geometry or its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board geometry {rows}x{cols} is outside the supported range")]
    Geometry { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell symbol '{symbol}' at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("piece at row {row}, column {col} is floating above an empty cell")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn { column: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
        assert_eq!(MoveError::ColumnFull(2).to_string(), "column 2 is full");
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::FloatingPiece { row: 3, col: 1 };
        assert_eq!(
            err.to_string(),
            "piece at row 3, column 1 is floating above an empty cell"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
