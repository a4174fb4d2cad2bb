//! Leaderboard records and game results.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::leaderboard::LeaderboardError;

/// Game result from the submitting player's perspective.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameResult {
    /// Player won the game.
    Win,
    /// Player lost the game.
    Loss,
    /// Game ended in a draw.
    Draw,
}

impl GameResult {
    /// Parses a result tag (`win`, `loss`, `draw`).
    ///
    /// # Errors
    ///
    /// Returns a validation [`LeaderboardError`] for any other tag.
    #[instrument]
    pub fn parse_tag(tag: &str) -> Result<Self, LeaderboardError> {
        tag.parse()
            .map_err(|_| LeaderboardError::validation("Result must be win, loss, or draw"))
    }
}

/// Accumulated statistics for one player.
///
/// Serialized with camelCase keys: `name`, `wins`, `losses`, `draws`,
/// `totalGames`, `winRate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    name: String,
    wins: u32,
    losses: u32,
    draws: u32,
    total_games: u32,
    win_rate: u32,
}

impl PlayerRecord {
    /// Creates an empty record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            draws: 0,
            total_games: 0,
            win_rate: 0,
        }
    }

    /// Creates a record with the given counts; totals and win rate are derived.
    pub fn with_counts(name: impl Into<String>, wins: u32, losses: u32, draws: u32) -> Self {
        let mut record = Self::new(name);
        record.wins = wins;
        record.losses = losses;
        record.draws = draws;
        record.total_games = wins + losses + draws;
        record.win_rate = win_rate(wins, record.total_games);
        record
    }

    /// Whether this record belongs to `name`, ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Counts one more game with the given result.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.total_games += 1;
        self.win_rate = win_rate(self.wins, self.total_games);
    }
}

/// Percentage of games won, rounded half up. Zero when no games.
pub fn win_rate(wins: u32, total_games: u32) -> u32 {
    if total_games == 0 {
        return 0;
    }
    let (wins, total) = (u64::from(wins), u64::from(total_games));
    ((200 * wins + total) / (2 * total)) as u32
}
