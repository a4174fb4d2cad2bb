//! Noughts engine - tic-tac-toe with a perfect-play opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Square`], [`Mark`] and [`Position`]
//! - **Rules**: [`evaluate`] reports a [`Outcome::Win`] with its [`WinLine`],
//!   a [`Outcome::Draw`], or [`Outcome::InProgress`]
//! - **Game**: [`Game`] owns a [`GameState`] and enforces turn order
//! - **Search**: [`select_computer_move`] runs full-depth minimax for O
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Game, Mark, Outcome};
//!
//! let mut game = Game::new();
//! game.apply_move(4, Mark::X)?;
//! let (_pos, outcome) = game.play_computer_move()?;
//! assert_eq!(outcome, Outcome::InProgress);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
mod rules;
mod search;
mod types;

pub use game::{ComputerMoveError, Game, GameState, InvalidMove};
pub use position::Position;
pub use rules::{Outcome, WinLine, evaluate, has_won, is_full, winning_line};
pub use search::{ScoredMove, SearchError, WIN_SCORE, best_move, minimax, select_computer_move};
pub use types::{Board, BoardParseError, Mark, Square};
