//! Noughts server library - leaderboard service and terminal client.
//!
//! # Architecture
//!
//! - **Leaderboard**: [`LeaderboardStore`] folds game results into
//!   per-player [`PlayerRecord`]s over a [`LeaderboardBackend`]
//! - **HTTP**: [`router`] serves `GET`/`POST /api/leaderboard`
//! - **Reporting**: [`ResultReporter`] carries finished games to a store,
//!   locally or through [`LeaderboardClient`]
//! - **Play**: [`PlaySession`] runs a game against the computer on any
//!   async line stream
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use noughts_server::{JsonFileBackend, LeaderboardStore, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = Arc::new(LeaderboardStore::new(JsonFileBackend::new("leaderboard.json")));
//! store.initialize().await?;
//! let app = router(store, 10);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod http;
mod leaderboard;
mod play;
mod reporter;
mod table;

pub use client::LeaderboardClient;
pub use config::{ConfigError, ENV_DATA_FILE, ENV_HOST, ENV_PORT, ServerConfig};
pub use http::{ErrorBody, SUBMIT_OK, SubmitScoreRequest, SubmitScoreResponse, router};
pub use leaderboard::{
    DEFAULT_TOP_N, GameResult, JsonFileBackend, LeaderboardBackend, LeaderboardError,
    LeaderboardErrorKind, LeaderboardStore, MemoryBackend, PlayerRecord, compare_rank, rank,
    win_rate,
};
pub use play::{MAX_NAME_LEN, NameError, PlaySession, Scoreboard, normalize_player_name};
pub use reporter::{ResultReporter, result_for_outcome};
pub use table::render_leaderboard;
