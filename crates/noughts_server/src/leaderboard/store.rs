//! Leaderboard business logic over a storage backend.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::leaderboard::{GameResult, LeaderboardBackend, LeaderboardError, PlayerRecord, rank};

/// Number of entries shown on the leaderboard.
pub const DEFAULT_TOP_N: usize = 10;

/// Records game results and serves the ranked leaderboard.
///
/// Every [`LeaderboardStore::record_result`] is a read-modify-write of the
/// whole collection, serialized by an internal lock so concurrent
/// submissions never lose updates. Queries do not take the lock; the
/// backend guarantees they see a complete collection.
#[derive(Debug)]
pub struct LeaderboardStore {
    backend: Box<dyn LeaderboardBackend>,
    write_lock: Mutex<()>,
}

impl LeaderboardStore {
    /// Creates a store over `backend`.
    #[instrument(skip(backend))]
    pub fn new(backend: impl LeaderboardBackend + 'static) -> Self {
        info!(?backend, "Creating LeaderboardStore");
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the persisted collection if absent. Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns a storage [`LeaderboardError`] if the backend cannot be created.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), LeaderboardError> {
        let _guard = self.write_lock.lock().await;
        self.backend.initialize().await
    }

    /// Counts one game for `name` and returns the updated record.
    ///
    /// Names match case-insensitively and are otherwise stored as given; a
    /// new record keeps the spelling of the first submission.
    ///
    /// # Errors
    ///
    /// Returns a validation [`LeaderboardError`] for an empty name, or a
    /// storage error if the collection cannot be read or written.
    /// On a storage error the persisted collection is unchanged.
    #[instrument(skip(self))]
    pub async fn record_result(
        &self,
        name: &str,
        result: GameResult,
    ) -> Result<PlayerRecord, LeaderboardError> {
        if name.is_empty() {
            return Err(LeaderboardError::validation("Player name is required"));
        }

        let _guard = self.write_lock.lock().await;
        let mut records = self.backend.read_all().await?;

        let idx = match records.iter().position(|r| r.matches_name(name)) {
            Some(idx) => idx,
            None => {
                debug!(name = %name, "Creating new player record");
                records.push(PlayerRecord::new(name));
                records.len() - 1
            }
        };
        records[idx].record(result);
        let updated = records[idx].clone();

        self.backend.write_all(&records).await?;

        info!(
            name = %updated.name(),
            result = %result,
            total_games = updated.total_games(),
            win_rate = updated.win_rate(),
            "Game result recorded"
        );
        Ok(updated)
    }

    /// Returns at most `limit` records, ranked by wins then fewest games.
    ///
    /// # Errors
    ///
    /// Returns a storage [`LeaderboardError`] if the collection cannot be read.
    #[instrument(skip(self))]
    pub async fn query_top(&self, limit: usize) -> Result<Vec<PlayerRecord>, LeaderboardError> {
        let records = self.backend.read_all().await?;
        let total = records.len();
        let top = rank(records, limit);
        debug!(total, returned = top.len(), "Leaderboard ranked");
        Ok(top)
    }
}
