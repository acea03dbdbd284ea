//! An opponent for playing the board game 'Connect 4'
//!
//! The engine explores the game tree with a depth-bounded minimax
//! search and picks the best column for the side to move, falling back
//! to a positional heuristic at the search horizon.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::{Board, Side}, engine::Engine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! let mut engine = Engine::new();
//! let outcome = engine.choose_move(&mut board, Side::PlayerOne, 2)?;
//!
//! assert_eq!(outcome.column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod config;

pub mod engine;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that a four-in-a-row window fits in both board dimensions
const_assert!(WIDTH >= 4);
const_assert!(HEIGHT >= 4);
