//! Storage backends for the persisted player collection.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::leaderboard::{LeaderboardError, PlayerRecord};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Whole-collection storage for player records.
///
/// Implementations must make each `write_all` visible atomically: a
/// concurrent `read_all` sees either the old collection or the new one.
#[async_trait]
pub trait LeaderboardBackend: Send + Sync + std::fmt::Debug {
    /// Creates an empty collection if none exists. Idempotent.
    async fn initialize(&self) -> Result<(), LeaderboardError>;

    /// Loads every record in storage order.
    async fn read_all(&self) -> Result<Vec<PlayerRecord>, LeaderboardError>;

    /// Replaces the stored collection.
    async fn write_all(&self, records: &[PlayerRecord]) -> Result<(), LeaderboardError>;
}

/// A single JSON document holding an array of records.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for the file at `path`. Nothing is touched until
    /// [`LeaderboardBackend::initialize`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating JSON file backend");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Sibling path used while writing, renamed over the real file when done.
    ///
    /// Unique per write, so backends sharing a path never collide.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "leaderboard.json".into());
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.path.with_file_name(name)
    }

    async fn write_atomic(&self, contents: &[u8]) -> Result<(), LeaderboardError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.temp_path();
        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(contents).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            warn!(error = %e, tmp = %tmp.display(), "Write failed, removing temp file");
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl LeaderboardBackend for JsonFileBackend {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn initialize(&self) -> Result<(), LeaderboardError> {
        if tokio::fs::try_exists(&self.path).await? {
            debug!("Leaderboard file exists");
            return Ok(());
        }
        info!("Creating empty leaderboard file");
        self.write_atomic(b"[]").await
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_all(&self) -> Result<Vec<PlayerRecord>, LeaderboardError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Leaderboard file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let records: Vec<PlayerRecord> = serde_json::from_str(&data)?;
        debug!(count = records.len(), "Leaderboard loaded");
        Ok(records)
    }

    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    async fn write_all(&self, records: &[PlayerRecord]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_vec_pretty(records)?;
        self.write_atomic(&json).await?;
        debug!("Leaderboard written");
        Ok(())
    }
}

/// In-process backend, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<Vec<PlayerRecord>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-loaded with `records`.
    pub fn with_records(records: Vec<PlayerRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl LeaderboardBackend for MemoryBackend {
    async fn initialize(&self) -> Result<(), LeaderboardError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PlayerRecord>, LeaderboardError> {
        Ok(self.records.read().await.clone())
    }

    async fn write_all(&self, records: &[PlayerRecord]) -> Result<(), LeaderboardError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_paths_are_unique_siblings() {
        let a = JsonFileBackend::new("/data/board.json");
        let b = JsonFileBackend::new("/data/board.json");
        let first = a.temp_path();
        let second = b.temp_path();
        assert_ne!(first, second);
        assert_ne!(first, a.temp_path());
        assert_eq!(first.parent(), Some(Path::new("/data")));
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("board.json."), "{name}");
        assert!(name.ends_with(".tmp"), "{name}");
    }
}
