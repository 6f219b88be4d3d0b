use crate::game::{Board, Cell, WinningLine};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn cell_span(cell: Cell, highlighted: bool) -> Span<'static> {
    let (symbol, color) = match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::X => (" \u{25cf} ", Color::Red),
        Cell::O => (" \u{25cf} ", Color::Yellow),
    };
    let style = if highlighted {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(symbol, style)
}

/// Column labels, framed grid and selection marker. Pieces on the winning
/// line are drawn highlighted.
pub fn board_lines(
    board: &Board,
    selected_column: Option<usize>,
    winning_line: Option<&WinningLine>,
) -> Vec<Line<'static>> {
    let cols = board.cols();
    let mut lines = Vec::with_capacity(board.rows() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..cols {
        let label = format!("{:^3}", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let bar = "═".repeat(cols * 3 + 1);
    lines.push(Line::from(format!("  ╔{bar}╗")));

    for row in 0..board.rows() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..cols {
            let highlighted = winning_line.is_some_and(|line| line.contains(row, col));
            row_spans.push(cell_span(board.get(row, col), highlighted));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{bar}╝")));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..cols {
        if Some(col) == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn frame_matches_board_width() {
        let lines = board_lines(&Board::new(), Some(3), None);
        // labels, top, 6 rows, bottom, indicator
        assert_eq!(lines.len(), 10);
        assert_eq!(text(&lines[1]), format!("  ╔{}╗", "═".repeat(22)));
        assert_eq!(text(&lines[9]).trim_end(), "             ▲");
    }

    #[test]
    fn winning_cells_are_highlighted() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Player::O).unwrap();
        }
        let line = board.detect_line().unwrap();
        let lines = board_lines(&board, None, Some(&line));
        let bottom = &lines[7];
        // spans: left frame, 7 cells, right frame
        assert_eq!(bottom.spans[1].style.fg, Some(Color::LightGreen));
        assert_eq!(bottom.spans[4].style.fg, Some(Color::LightGreen));
        assert_eq!(bottom.spans[5].style.fg, Some(Color::DarkGray));
    }
}
