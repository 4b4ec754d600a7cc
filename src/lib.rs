//! Monte Carlo tree search for line-forming board games played on a square grid.

/// (row, col)
pub type Move = (usize, usize);

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod mcts;
pub mod tree;

pub use board::{BoardState, Cell, Grid, Player};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use game::{GameAdapter, Outcome};
pub use mcts::{compute_next_move, ChildStats, Mcts};
