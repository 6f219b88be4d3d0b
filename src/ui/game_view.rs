use crate::game::{GameState, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::board_lines;

fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Red,
        Player::O => Color::Yellow,
    }
}

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    human: Player,
) {
    let board_height = game_state.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, human, chunks[0]);
    render_board(frame, game_state, selected_column, human, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game_state: &GameState, human: Player, area: Rect) {
    let current = game_state.current_player();
    let side = format!("You: {} vs AI: {}", human, human.other());

    let status = if game_state.is_terminal() {
        format!("Game Over  |  {side}")
    } else if current == human {
        format!("Your turn ({current})  |  {side}")
    } else {
        format!("AI's turn ({current})  |  {side}")
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    human: Player,
    area: Rect,
) {
    // Only show the column cursor while the human can act.
    let selected = (!game_state.is_terminal() && game_state.current_player() == human)
        .then_some(selected_column);
    let winning_line = game_state.winning_line();
    let lines = board_lines(game_state.board(), selected, winning_line.as_ref());

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::raw("←/→: Move  |  Enter/1-9: Drop  |  "),
        Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Restart  |  "),
        Span::styled("Q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Quit"),
    ]);

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
