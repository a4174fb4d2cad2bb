//! HTTP client for a remote leaderboard service.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::http::{ErrorBody, SubmitScoreRequest, SubmitScoreResponse};
use crate::leaderboard::{GameResult, PlayerRecord};

/// Talks to `/api/leaderboard` on a running server.
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    base_url: String,
    client: reqwest::Client,
}

impl LeaderboardClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        info!("Creating leaderboard client");
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/leaderboard", self.base_url)
    }

    /// Submits one result and returns the server's updated record.
    #[instrument(skip(self))]
    pub async fn submit(&self, player_name: &str, result: GameResult) -> Result<PlayerRecord> {
        let body = SubmitScoreRequest {
            player_name: Some(player_name.to_string()),
            result: Some(result.to_string()),
        };
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("Failed to reach leaderboard server")?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            anyhow::bail!("Score submission failed ({}): {}", status, reason);
        }

        let accepted: SubmitScoreResponse = response
            .json()
            .await
            .context("Malformed submission response")?;
        debug!(message = %accepted.message, "Score accepted");
        Ok(accepted.player)
    }

    /// Fetches the ranked leaderboard.
    #[instrument(skip(self))]
    pub async fn fetch_top(&self) -> Result<Vec<PlayerRecord>> {
        let response = self
            .client
            .get(self.endpoint())
            .send()
            .await
            .context("Failed to reach leaderboard server")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Failed to fetch leaderboard: {}", status);
        }
        let records: Vec<PlayerRecord> = response
            .json()
            .await
            .context("Malformed leaderboard response")?;
        debug!(count = records.len(), "Leaderboard fetched");
        Ok(records)
    }
}
