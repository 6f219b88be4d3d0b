//! # Connect Four
//!
//! Connect Four against a depth-limited alpha-beta search. The board model,
//! heuristic and search engine live here once and are shared by the terminal
//! UI built with Ratatui and the line-based console.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, game session
//! - [`ai`] — Heuristic evaluation, alpha-beta search, agents
//! - [`console`] — Text front end
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Log dispatcher setup for the binaries
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
