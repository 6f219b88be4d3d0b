//! Move selection: the position heuristic, the alpha-beta search engine and
//! the agents front ends play against.

mod agent;
pub mod alphabeta;
pub mod heuristic;
mod random;

pub use agent::Agent;
pub use alphabeta::{ordered_moves, AlphaBeta, AlphaBetaAgent, SearchResult, WIN_SCORE};
pub use heuristic::{Heuristic, HeuristicWeights, Score, WindowHeuristic};
pub use random::RandomAgent;
