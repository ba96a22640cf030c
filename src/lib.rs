//! Poly-Y: rules engine for Y played on polygonal boards.
//!
//! Players take turns claiming fields of a board graph whose boundary is cut
//! into sides. A chain of one player's stones that touches at least three
//! sides captures every corner between two sides it touches; a player
//! holding more than half of the corners wins.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and text format constants
//! - [`board`] - Immutable board graph with side masks
//! - [`format`] - Board description reader and writer
//! - [`game`] - Moves, turn order, legality and termination
//! - [`score`] - Chain search and corner counting
//! - [`transcript`] - Move transcript codec
//! - [`protocol`] - Line-oriented referee protocol
//! - [`playout`] - Random self-play
//!
//! ## Example
//!
//! ```
//! use poly_y::board::Board;
//! use poly_y::game::{Game, Move, Player};
//!
//! let mut game = Game::new(Board::triangular(1).unwrap());
//! game.execute(Move::Place(0)).unwrap();
//!
//! assert!(game.is_over());
//! assert_eq!(game.winner(), Some(Player::First));
//! assert_eq!(game.scores().first, 3);
//! ```

pub mod board;
pub mod constants;
pub mod format;
pub mod game;
pub mod playout;
pub mod protocol;
pub mod score;
pub mod transcript;
