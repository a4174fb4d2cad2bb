//! Full-depth minimax search for the computer opponent.
//!
//! O maximises and X minimises. Terminal positions score
//! [`WIN_SCORE`] for an O win, `-WIN_SCORE` for an X win and 0 for a draw,
//! with no depth discount. Each recursive call works on its own copy of the
//! board, so there is no shared state to undo.
//!
//! Candidates are visited in ascending index order and a later candidate
//! replaces the current best only when strictly better, so the lowest index
//! wins ties.

use crate::rules::{has_won, is_full};
use crate::{Board, Mark, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Magnitude of a decisive result.
pub const WIN_SCORE: i32 = 10;

/// Search was asked to move on a finished board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// The board is full or already won.
    #[display("No moves available: the game is already over")]
    NoMovesAvailable,
}

/// A candidate move with its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Where to play.
    pub position: Position,
    /// Value of the position after playing here, from O's point of view.
    pub score: i32,
}

/// Scores a finished board, or returns `None` if play continues.
fn terminal_score(board: &Board) -> Option<i32> {
    if has_won(board, Mark::X) {
        Some(-WIN_SCORE)
    } else if has_won(board, Mark::O) {
        Some(WIN_SCORE)
    } else if is_full(board) {
        Some(0)
    } else {
        None
    }
}

fn improves(mover: Mark, candidate: i32, best: i32) -> bool {
    match mover {
        Mark::O => candidate > best,
        Mark::X => candidate < best,
    }
}

/// Returns the best move for `to_move` on a non-terminal board.
fn best_child(board: &Board, to_move: Mark) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for position in Position::ALL.into_iter().filter(|p| board.is_empty(*p)) {
        let child = board.with_mark(position, to_move);
        let score = value(&child, to_move.opponent());
        if best.is_none_or(|b| improves(to_move, score, b.score)) {
            best = Some(ScoredMove { position, score });
        }
    }
    best
}

fn value(board: &Board, to_move: Mark) -> i32 {
    match terminal_score(board) {
        Some(score) => score,
        // A non-terminal board always has an empty square.
        None => best_child(board, to_move).map_or(0, |m| m.score),
    }
}

/// Minimax value of `board` with `to_move` to play.
pub fn minimax(board: &Board, to_move: Mark) -> i32 {
    value(board, to_move)
}

/// Finds the optimal move for `mark`.
///
/// # Errors
///
/// Returns [`SearchError::NoMovesAvailable`] if the board is full or won.
#[instrument(skip(board), fields(occupied = board.occupied_count()))]
pub fn best_move(board: &Board, mark: Mark) -> Result<ScoredMove, SearchError> {
    if terminal_score(board).is_some() {
        return Err(SearchError::NoMovesAvailable);
    }
    let chosen = best_child(board, mark).ok_or(SearchError::NoMovesAvailable)?;
    debug!(position = %chosen.position, score = chosen.score, "Search complete");
    Ok(chosen)
}

/// Chooses the computer's move, playing as O.
///
/// # Errors
///
/// Returns [`SearchError::NoMovesAvailable`] if the board is full or won.
pub fn select_computer_move(board: &Board) -> Result<Position, SearchError> {
    best_move(board, Mark::O).map(|m| m.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_takes_immediate_win() {
        // O can win at 5 (middle row) or block X at 2; winning is preferred.
        let b = board("XX. OO. X..");
        let mv = best_move(&b, Mark::O).unwrap();
        assert_eq!(mv.position, Position::MiddleRight);
        assert_eq!(mv.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_column_threat() {
        let b = board("X.. X.. .O.");
        assert_eq!(select_computer_move(&b), Ok(Position::BottomLeft));
    }

    #[test]
    fn test_x_side_prefers_win() {
        let b = board("XX. .O. ..O");
        let mv = best_move(&b, Mark::X).unwrap();
        assert_eq!(mv.position, Position::TopRight);
        assert_eq!(mv.score, -WIN_SCORE);
    }

    #[test]
    fn test_ties_break_to_lowest_index() {
        // Every reply draws against a center opening; the corner at 0 comes first.
        let b = board("... .X. ...");
        let mv = best_move(&b, Mark::O).unwrap();
        assert_eq!(mv.score, 0);
        assert_eq!(mv.position, Position::TopLeft);
    }

    #[test]
    fn test_finished_boards_rejected() {
        assert_eq!(
            select_computer_move(&board("XOX XOO OXX")),
            Err(SearchError::NoMovesAvailable)
        );
        assert_eq!(
            select_computer_move(&board("XXX OO. ...")),
            Err(SearchError::NoMovesAvailable)
        );
    }

    #[test]
    fn test_forced_loss_still_returns_a_move() {
        // X has two open lines; O can block only one.
        let b = board("X.X .O. X.O");
        let mv = best_move(&b, Mark::O).unwrap();
        assert_eq!(mv.score, -WIN_SCORE);
    }
}
