//! Server configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `API_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:automation.db?mode=rwc` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_addr = env::var("API_ADDR").unwrap_or_else(|_| "127.0.0.1:8790".to_string());
        let addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(raw_addr))?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:automation.db?mode=rwc".to_string());

        Ok(Self { addr, database_url })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_ADDR: {0}")]
    InvalidAddr(String),
}
