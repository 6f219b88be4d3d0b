//! Terminal UI: play Connect Four against an [`Agent`](crate::ai::Agent) with
//! the keyboard.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
