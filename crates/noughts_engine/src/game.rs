//! Game state machine for tic-tac-toe.

use crate::rules::{Outcome, evaluate};
use crate::search::{SearchError, select_computer_move};
use crate::{Board, Mark, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Errors that can occur when applying a move.
///
/// A rejected move leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,
    /// Index outside 0-8.
    #[display("Position {_0} out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),
    /// Square is already occupied.
    #[display("{_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),
    /// The mark does not have the move.
    #[display("It is {expected}'s turn, not {got}'s")]
    WrongTurn {
        /// Mark that has the move.
        expected: Mark,
        /// Mark that tried to move.
        got: Mark,
    },
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Mark,
    outcome: Outcome,
    history: Vec<Position>,
}

impl GameState {
    /// Fresh state: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move. After the game ends this is the mark
    /// that made the final move.
    pub fn current_mark(&self) -> Mark {
        self.current
    }

    /// Returns the outcome of the last evaluation.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether moves are still accepted.
    pub fn is_active(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Returns the positions played, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tic-tac-toe game engine. Sole owner of its [`GameState`].
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Places `mark` at board index `index` (0-8) and evaluates termination.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the game is over, the index is out of
    /// bounds, the square is taken, or it is not `mark`'s turn.
    #[instrument(skip(self), fields(current = %self.state.current))]
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<Outcome, InvalidMove> {
        let pos = Position::from_index(index).ok_or(InvalidMove::OutOfBounds(index))?;
        self.place(pos, mark)
    }

    /// Places `mark` at `pos` and evaluates termination.
    ///
    /// # Errors
    ///
    /// See [`Game::apply_move`].
    #[instrument(skip(self), fields(position = %pos))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<Outcome, InvalidMove> {
        if !self.state.is_active() {
            warn!("Move rejected: game over");
            return Err(InvalidMove::GameOver);
        }
        if mark != self.state.current {
            warn!(expected = %self.state.current, got = %mark, "Move rejected: wrong turn");
            return Err(InvalidMove::WrongTurn {
                expected: self.state.current,
                got: mark,
            });
        }
        if !self.state.board.is_empty(pos) {
            warn!("Move rejected: square occupied");
            return Err(InvalidMove::SquareOccupied(pos));
        }

        self.state.board = self.state.board.with_mark(pos, mark);
        self.state.history.push(pos);

        let outcome = evaluate(&self.state.board);
        self.state.outcome = outcome;
        if outcome.is_terminal() {
            info!(?outcome, moves = self.state.history.len(), "Game over");
        } else {
            self.state.current = mark.opponent();
            debug!(next = %self.state.current, "Move applied");
        }
        Ok(outcome)
    }

    /// Chooses and plays the computer's (O's) move.
    ///
    /// # Errors
    ///
    /// Returns [`ComputerMoveError`] if the game is over or it is X's turn.
    #[instrument(skip(self))]
    pub fn play_computer_move(&mut self) -> Result<(Position, Outcome), ComputerMoveError> {
        if !self.state.is_active() {
            return Err(InvalidMove::GameOver.into());
        }
        if self.state.current != Mark::O {
            return Err(InvalidMove::WrongTurn {
                expected: self.state.current,
                got: Mark::O,
            }
            .into());
        }
        let pos = select_computer_move(&self.state.board)?;
        let outcome = self.place(pos, Mark::O)?;
        Ok((pos, outcome))
    }

    /// Clears the board and gives X the move. Valid from any state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.state.history.len(), "Resetting game");
        self.state = GameState::new();
    }
}

/// Failure to play the computer's move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, derive_more::From)]
pub enum ComputerMoveError {
    /// The move itself was not legal in the current state.
    #[display("{_0}")]
    Invalid(InvalidMove),
    /// The search found nothing to play.
    #[display("{_0}")]
    Search(SearchError),
}
