//! Leaderboard error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong in a leaderboard operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LeaderboardErrorKind {
    /// Bad input from the caller. Always correctable by the caller.
    #[display("Validation error: {_0}")]
    Validation(String),
    /// The persisted collection could not be read or written.
    #[display("Storage error: {_0}")]
    Storage(String),
}

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct LeaderboardError {
    /// Error category and message.
    pub kind: LeaderboardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(kind: LeaderboardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a validation error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(LeaderboardErrorKind::Validation(message.into()))
    }

    /// Creates a storage error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(LeaderboardErrorKind::Storage(message.into()))
    }

    /// Whether the caller supplied bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, LeaderboardErrorKind::Validation(_))
    }

    /// The bare message without category or location.
    pub fn message(&self) -> &str {
        match &self.kind {
            LeaderboardErrorKind::Validation(m) | LeaderboardErrorKind::Storage(m) => m,
        }
    }
}

impl From<std::io::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("Malformed leaderboard data: {}", err))
    }
}
