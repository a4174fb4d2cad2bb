//! Termination rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WinLine, has_won, winning_line};

use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty squares remain.
    InProgress,
    /// `mark` completed `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The first completed line in evaluation order.
        line: WinLine,
    },
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// Whether this outcome ends the game.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

/// Evaluates a board for a win, a draw, or neither.
///
/// Wins are checked before fullness, so a move that fills the last
/// square and completes a line is a win.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = winning_line(board) {
        return Outcome::Win { mark, line };
    }
    if is_full(board) {
        return Outcome::Draw;
    }
    Outcome::InProgress
}
