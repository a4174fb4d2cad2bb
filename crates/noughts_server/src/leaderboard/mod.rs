//! Persistent per-player statistics and the ranked leaderboard.

mod backend;
mod error;
mod models;
mod ranking;
mod store;

pub use backend::{JsonFileBackend, LeaderboardBackend, MemoryBackend};
pub use error::{LeaderboardError, LeaderboardErrorKind};
pub use models::{GameResult, PlayerRecord, win_rate};
pub use ranking::{compare_rank, rank};
pub use store::{DEFAULT_TOP_N, LeaderboardStore};
