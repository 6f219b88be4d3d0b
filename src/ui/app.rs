use crate::ai::Agent;
use crate::error::{BoardError, MoveError};
use crate::game::{GameResult, GameState, Geometry, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::{backend::Backend, Terminal};
use std::io;

const THINKING: &str = "AI is thinking...";

pub struct App {
    geometry: Geometry,
    game_state: GameState,
    human: Player,
    agent: Box<dyn Agent>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(geometry: Geometry, human: Player, agent: Box<dyn Agent>) -> Result<Self, BoardError> {
        let game_state = GameState::with_geometry(geometry)?;
        info!(
            "new {}x{} game, human plays {}, AI: {}",
            geometry.rows,
            geometry.cols,
            human,
            agent.name()
        );
        Ok(App {
            geometry,
            selected_column: game_state.board().center_col(), // Start in middle
            game_state,
            human,
            agent,
            should_quit: false,
            message: None,
        })
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn is_ai_turn(&self) -> bool {
        !self.game_state.is_terminal() && self.game_state.current_player() != self.human
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let ai_turn = self.is_ai_turn();
            if ai_turn {
                self.message = Some(THINKING.to_string());
            }

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // The search blocks; the frame above keeps the thinking notice up.
            if ai_turn {
                self.play_ai_move();
            } else {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.geometry.cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.geometry.cols {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        // Geometry was validated in `new`.
        if let Ok(state) = GameState::with_geometry(self.geometry) {
            self.game_state = state;
        }
        self.selected_column = self.game_state.board().center_col();
        self.message = Some("New game started!".to_string());
        info!("game restarted");
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.game_state.current_player() != self.human {
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(_) => self.announce_result(),
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    fn play_ai_move(&mut self) {
        let Some(column) = self.agent.select_action(&self.game_state) else {
            return;
        };
        match self.game_state.apply_move_mut(column) {
            Ok(_) => {
                self.message = Some(format!("AI chose column {}", column + 1));
                self.announce_result();
            }
            Err(err) => {
                log::error!("{} picked an unplayable column {}: {}", self.agent.name(), column, err);
                self.message = Some(format!("AI error: {err}"));
            }
        }
    }

    fn announce_result(&mut self) {
        let text = match self.game_state.outcome() {
            GameResult::Ongoing => return,
            GameResult::Draw => "It's a draw!",
            GameResult::Win(player) if player == self.human => "You win!",
            GameResult::Win(_) => "You lose!",
        };
        info!(
            "game over after {} moves: {}",
            self.game_state.turn(),
            text
        );
        self.message = Some(format!("{text} Press 'r' to play again."));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            self.human,
        );
    }
}
