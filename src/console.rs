//! Line-based front end: prints the board, reads 1-based column numbers from
//! the human and lets an [`Agent`] answer.

use std::io::{self, BufRead, Write};

use log::info;

use crate::ai::Agent;
use crate::game::{Board, GameResult, GameState, Player};

/// Board framed with `|` and followed by 1-based column labels.
pub fn render_board(board: &Board) -> String {
    // Cells are as wide as the widest label.
    let width = board.cols().to_string().len();
    let mut out = String::new();
    for row in 0..board.rows() {
        out.push('|');
        for col in 0..board.cols() {
            out.push_str(&format!(" {:>width$}", board.get(row, col).symbol()));
        }
        out.push_str(" |\n");
    }
    out.push(' ');
    for col in 0..board.cols() {
        out.push_str(&format!(" {:>width$}", col + 1));
    }
    out.push('\n');
    out
}

/// End-of-game line from the human's point of view.
pub fn result_message(result: GameResult, human: Player) -> &'static str {
    match result {
        GameResult::Draw => "Game Over: Draw!",
        GameResult::Win(player) if player == human => "Game Over: You win!",
        GameResult::Win(_) => "Game Over: You lose!",
        GameResult::Ongoing => "Game abandoned.",
    }
}

/// Play until the game ends, the human enters `q`, or input runs out.
/// Returns the final state.
pub fn play<R: BufRead, W: Write>(
    mut state: GameState,
    human: Player,
    agent: &mut dyn Agent,
    input: &mut R,
    output: &mut W,
) -> io::Result<GameState> {
    writeln!(output, "=== Connect 4 CLI (Human vs AI) ===")?;
    info!("console game started, human plays {human}");

    loop {
        writeln!(output, "\nCurrent Board:\n")?;
        write!(output, "{}", render_board(state.board()))?;

        if state.is_terminal() {
            break;
        }

        let column = if state.current_player() == human {
            match read_column(&state, input, output)? {
                Some(column) => column,
                None => break,
            }
        } else {
            writeln!(output, "AI is thinking...")?;
            let Some(column) = agent.select_action(&state) else {
                break;
            };
            writeln!(output, "AI chooses column {}", column + 1)?;
            column
        };

        state = state
            .apply_move(column)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }

    let result = state.outcome();
    writeln!(output, "{}", result_message(result, human))?;
    info!("console game finished after {} moves: {:?}", state.turn(), result);
    Ok(state)
}

/// Prompt until the human names a legal column. `None` on EOF or `q`.
fn read_column<R: BufRead, W: Write>(
    state: &GameState,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<usize>> {
    let legal = state.legal_actions();
    let cols = state.board().cols();
    writeln!(output, "Your turn, Player {}", state.current_player())?;

    loop {
        write!(output, "Choose a column (1-{cols}): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match line.parse::<usize>() {
            Ok(n) if n >= 1 && legal.contains(&(n - 1)) => return Ok(Some(n - 1)),
            Ok(_) => writeln!(output, "Invalid move, try again.")?,
            Err(_) => writeln!(output, "Please enter a number.")?,
        }
    }
}
