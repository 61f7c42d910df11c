//! A minimax agent for playing the board game 'Connect 4'
//!
//! This agent searches the game tree with alpha-beta pruning, history-based
//! move ordering and iterative deepening under a wall-clock time budget to
//! choose a column to drop a piece in.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::BoardState, search::SearchEngine};
//! use std::time::Duration;
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = BoardState::from_moves("112233")?;
//! let mut engine = SearchEngine::new(4, Duration::from_secs(8));
//! let (best_move, score) = engine.choose_move(&mut board, true, true)?;
//!
//! assert_eq!(best_move, 3);
//! assert!(score >= 1.0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod win;

pub mod eval;

pub mod ordering;

pub mod search;

pub mod benchmark;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// a four-in-a-row must fit on the board in every orientation
const_assert!(WIDTH >= 4);
const_assert!(HEIGHT >= 4);

// move strings encode each column as a single 1-based digit
const_assert!(WIDTH <= 9);
