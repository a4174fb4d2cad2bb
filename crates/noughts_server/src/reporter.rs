//! Glue between finished games and the leaderboard.

use anyhow::Result;
use async_trait::async_trait;
use noughts_engine::{Mark, Outcome};

use crate::client::LeaderboardClient;
use crate::leaderboard::{DEFAULT_TOP_N, GameResult, LeaderboardStore, PlayerRecord};

/// The human plays X, so results are from X's point of view.
///
/// Returns `None` while the game is still in progress.
pub fn result_for_outcome(outcome: Outcome) -> Option<GameResult> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win { mark: Mark::X, .. } => Some(GameResult::Win),
        Outcome::Win { mark: Mark::O, .. } => Some(GameResult::Loss),
        Outcome::Draw => Some(GameResult::Draw),
    }
}

/// Where finished games are reported and the leaderboard is read from.
#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Records one result for `player_name`.
    async fn report(&self, player_name: &str, result: GameResult) -> Result<PlayerRecord>;

    /// Returns the ranked leaderboard.
    async fn leaderboard(&self) -> Result<Vec<PlayerRecord>>;
}

#[async_trait]
impl ResultReporter for LeaderboardClient {
    async fn report(&self, player_name: &str, result: GameResult) -> Result<PlayerRecord> {
        self.submit(player_name, result).await
    }

    async fn leaderboard(&self) -> Result<Vec<PlayerRecord>> {
        self.fetch_top().await
    }
}

#[async_trait]
impl ResultReporter for LeaderboardStore {
    async fn report(&self, player_name: &str, result: GameResult) -> Result<PlayerRecord> {
        Ok(self.record_result(player_name, result).await?)
    }

    async fn leaderboard(&self) -> Result<Vec<PlayerRecord>> {
        Ok(self.query_top(DEFAULT_TOP_N).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_engine::WinLine;

    #[test]
    fn test_outcome_mapping() {
        let line = WinLine::ALL[0];
        assert_eq!(result_for_outcome(Outcome::InProgress), None);
        assert_eq!(
            result_for_outcome(Outcome::Win { mark: Mark::X, line }),
            Some(GameResult::Win)
        );
        assert_eq!(
            result_for_outcome(Outcome::Win { mark: Mark::O, line }),
            Some(GameResult::Loss)
        );
        assert_eq!(result_for_outcome(Outcome::Draw), Some(GameResult::Draw));
    }
}
