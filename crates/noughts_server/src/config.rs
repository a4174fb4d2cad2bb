//! Server configuration.
//!
//! Layered lowest to highest: defaults, TOML file, `NOUGHTS_*` environment
//! variables, command-line overrides.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::leaderboard::DEFAULT_TOP_N;

/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "NOUGHTS_HOST";
/// Environment variable overriding the bind port.
pub const ENV_PORT: &str = "NOUGHTS_PORT";
/// Environment variable overriding the leaderboard file.
pub const ENV_DATA_FILE: &str = "NOUGHTS_DATA_FILE";

/// Configuration for the leaderboard server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// JSON file holding the player records.
    #[serde(default = "default_data_file")]
    data_file: PathBuf,

    /// Entries returned by the leaderboard query.
    #[serde(default = "default_top_n")]
    top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("leaderboard.json")
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            top_n: default_top_n(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads defaults, then `path` if given, then the process environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        info!(host = %config.host, port = config.port, data_file = %config.data_file.display(), "Config loaded");
        Ok(config)
    }

    /// Applies `NOUGHTS_*` overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the port variable is not a valid port.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(format!("{ENV_PORT} is not a valid port: {port}")))?;
        }
        if let Some(file) = lookup(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(file);
        }
        Ok(())
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        data_file: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ServerConfig::from_toml("port = 8080\n").unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.top_n(), 10);
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(ServerConfig::from_toml("port = \"many\"").is_err());
    }

    #[test]
    fn test_env_then_cli_precedence() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_PORT, "4000"), (ENV_DATA_FILE, "/tmp/board.json")]);
        let mut config = ServerConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(*config.port(), 4000);
        assert_eq!(config.data_file(), &PathBuf::from("/tmp/board.json"));

        let config = config.with_overrides(Some("0.0.0.0".into()), Some(5000), None);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 5000);
        assert_eq!(config.data_file(), &PathBuf::from("/tmp/board.json"));
    }

    #[test]
    fn test_bad_env_port() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(|k| (k == ENV_PORT).then(|| "nope".to_string()))
            .unwrap_err();
        assert!(err.message.contains(ENV_PORT));
    }
}
