//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the item collection
    pub data_path: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Change watcher poll interval in milliseconds
    pub watch_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - Item collection file (default: data/items.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `WATCH_INTERVAL_MS` - Change watcher poll interval (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env::var("DATA_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            watch_interval_ms: env::var("WATCH_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.watch_interval_ms),
        }
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            server_port: 3001,
            watch_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data/items.json"));
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.watch_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DATA_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("WATCH_INTERVAL_MS");

        let config = Config::from_env();
        assert_eq!(config.data_path, PathBuf::from("data/items.json"));
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.watch_interval_ms, 1000);
    }
}
